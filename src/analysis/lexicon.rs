//! Fixed interpretation dictionaries.
//!
//! These tables are defined over the same alphabet as the derivation
//! tables and are not internationalized.

/// Words recognized by the lexical pass, matched by containment in
/// either direction.
pub const COMMON_WORDS: [&str; 15] = [
    "الله",
    "الرحمن",
    "الرحيم",
    "العلم",
    "الحكمة",
    "النور",
    "الهدى",
    "الخير",
    "البركة",
    "السعادة",
    "الصبر",
    "اليقين",
    "التوفيق",
    "النجاح",
    "الفوز",
];

/// Canned phrases for exactly matched words.
pub const WORD_MEANINGS: [(&str, &str); 13] = [
    ("الله", "الله سبحانه وتعالى"),
    ("رحمن", "الرحمن الرحيم"),
    ("عليم", "العليم الحكيم"),
    ("حكيم", "الحكمة والإتقان"),
    ("نور", "النور والهداية"),
    ("هدى", "الهداية والتوفيق"),
    ("خير", "الخير والبركة"),
    ("بركة", "البركة والنماء"),
    ("صبر", "الصبر والثبات"),
    ("يقين", "اليقين والثقة"),
    ("توفيق", "التوفيق والنجاح"),
    ("نجاح", "النجاح والفلاح"),
    ("فتح", "الفتح والنصر"),
];

/// Keywords for the first decimation stage.
pub const STAGE_1_MEANINGS: [(&str, &str); 3] = [
    ("خير", "الخير حاضر"),
    ("نور", "النور ساطع"),
    ("هدى", "الهداية قريبة"),
];

/// Keywords for the second decimation stage.
pub const STAGE_2_MEANINGS: [(&str, &str); 3] = [
    ("صبر", "الصبر مطلوب"),
    ("عمل", "العمل مجزٍ"),
    ("جهد", "الجهد مثمر"),
];

/// Keywords for the third decimation stage.
pub const STAGE_3_MEANINGS: [(&str, &str); 3] = [
    ("توفيق", "التوفيق حليفك"),
    ("نجاح", "النجاح في الطريق"),
    ("فتح", "الفتح قادم"),
];

/// Emitted when no decimation stage matches anything.
pub const GENERIC_REFLECTION: &str = "النتيجة تحتاج إلى تأمل وتفكير";

/// Advisory phrases per nature, in table order (fire, air, water,
/// earth).
pub const NATURE_ADVICE: [&str; 4] = [
    "الطاقة نارية تحتاج إلى توجيه صحيح",
    "التفكير مجرد يحتاج إلى تركيز",
    "المشاعر غالبة تحتاج إلى توازن",
    "الواقعية غالبة تحتاج إلى مرونة",
];

/// Divine-name words scanned by the weighted decimation metrics.
pub const DIVINE_NAMES: [&str; 20] = [
    "الله",
    "رحمن",
    "رحيم",
    "ملك",
    "قدوس",
    "سلام",
    "مؤمن",
    "مهيمن",
    "عزيز",
    "جبار",
    "متكبر",
    "خالق",
    "بارئ",
    "مصور",
    "غفار",
    "قهار",
    "وهاب",
    "رزاق",
    "فتاح",
    "عليم",
];
