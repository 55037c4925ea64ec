//! Fixed lookup tables for the abjad derivation system.
//!
//! The alphabet is stored once, in **abjadi order** (أ ب ج د ه و ز ح ط ي
//! ك ل م ن س ع ف ص ق ر ش ت ث خ ذ ض ظ غ). That order is the canonical
//! enumeration order for every inverse lookup and tie-break in the crate:
//! compact numeral values are 1–28 by position, mirror letters pair the
//! first position with the last, and nature classes cycle fire/air/water/
//! earth along it.

/// The 28 alphabet letters in abjadi order, with their gross
/// (hisab-al-jumal) numeral values.
pub(crate) const ALPHABET: [(char, u32); 28] = [
    ('ا', 1),
    ('ب', 2),
    ('ج', 3),
    ('د', 4),
    ('ه', 5),
    ('و', 6),
    ('ز', 7),
    ('ح', 8),
    ('ط', 9),
    ('ي', 10),
    ('ك', 20),
    ('ل', 30),
    ('م', 40),
    ('ن', 50),
    ('س', 60),
    ('ع', 70),
    ('ف', 80),
    ('ص', 90),
    ('ق', 100),
    ('ر', 200),
    ('ش', 300),
    ('ت', 400),
    ('ث', 500),
    ('خ', 600),
    ('ذ', 700),
    ('ض', 800),
    ('ظ', 900),
    ('غ', 1000),
];

/// Ratio table over single-digit pairs: the digit-root multiplication
/// square. Total over [1,9] × [1,9]; row = first digit, column = second.
pub(crate) const RATIO: [[u8; 9]; 9] = [
    [1, 2, 3, 4, 5, 6, 7, 8, 9],
    [2, 4, 6, 8, 1, 3, 5, 7, 9],
    [3, 6, 9, 3, 6, 9, 3, 6, 9],
    [4, 8, 3, 7, 2, 6, 1, 5, 9],
    [5, 1, 6, 2, 7, 3, 8, 4, 9],
    [6, 3, 9, 6, 3, 9, 6, 3, 9],
    [7, 5, 3, 1, 8, 6, 4, 2, 9],
    [8, 7, 6, 5, 4, 3, 2, 1, 9],
    [9, 9, 9, 9, 9, 9, 9, 9, 9],
];

/// Weekday names with their hundred-valued time buckets.
pub(crate) const DAYS: [(&str, u32); 7] = [
    ("السبت", 100),
    ("الأحد", 200),
    ("الاثنين", 300),
    ("الثلاثاء", 400),
    ("الأربعاء", 500),
    ("الخميس", 600),
    ("الجمعة", 700),
];

/// Hijri month names with their 1-based indices.
pub(crate) const MONTHS: [(&str, u32); 12] = [
    ("محرم", 1),
    ("صفر", 2),
    ("ربيع الأول", 3),
    ("ربيع الآخر", 4),
    ("جمادى الأولى", 5),
    ("جمادى الآخرة", 6),
    ("رجب", 7),
    ("شعبان", 8),
    ("رمضان", 9),
    ("شوال", 10),
    ("ذو القعدة", 11),
    ("ذو الحجة", 12),
];

/// Zodiac sign names with their table values.
pub(crate) const ZODIAC: [(&str, u32); 12] = [
    ("الحمل", 1),
    ("الثور", 2),
    ("الجوزاء", 3),
    ("السرطان", 4),
    ("الأسد", 5),
    ("العذراء", 6),
    ("الميزان", 7),
    ("العقرب", 8),
    ("القوس", 9),
    ("الجدي", 10),
    ("الدلو", 11),
    ("الحوت", 12),
];

/// The 28 lunar mansion names with their table values.
pub(crate) const MANSIONS: [(&str, u32); 28] = [
    ("الشرطان", 1),
    ("البطين", 2),
    ("الثريا", 3),
    ("الدبران", 4),
    ("الهقعة", 5),
    ("الهنعة", 6),
    ("الذراع", 7),
    ("النثرة", 8),
    ("الطرف", 9),
    ("الجبهة", 10),
    ("الزبرة", 11),
    ("الصرفة", 12),
    ("العواء", 13),
    ("السماك", 14),
    ("الغفر", 15),
    ("الزبانى", 16),
    ("الإكليل", 17),
    ("القلب", 18),
    ("الشولة", 19),
    ("النعائم", 20),
    ("البلدة", 21),
    ("سعد الذابح", 22),
    ("سعد بلع", 23),
    ("سعد السعود", 24),
    ("سعد الأخبية", 25),
    ("فرغ المقدم", 26),
    ("فرغ المؤخر", 27),
    ("بطن الحوت", 28),
];
