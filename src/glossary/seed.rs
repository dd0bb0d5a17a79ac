//! Terms installed into a new glossary database.

/// Product and vendor names kept verbatim, seeded under `Technology`.
pub const SEED_PROTECTED: &[&str] = &[
    "LinkedIn",
    "PayTR",
    ".NET",
    "Docker",
    "GitHub",
    "Google",
    "Microsoft",
    "SAP",
    "Oracle",
    "AWS",
    "Azure",
    "ERP",
    "CRM",
    "Excel",
    "Word",
    "PowerPoint",
];

pub const SEED_PROTECTED_CATEGORY: &str = "Technology";

/// Turkish to English business vocabulary, seeded under `general`.
pub const SEED_FORCED: &[(&str, &str)] = &[
    ("İç veri", "Internal data"),
    ("Maliyet", "Cost"),
    ("Dezavantaj", "Disadvantage"),
    ("Avantaj", "Advantage"),
    ("Kriter", "Criterion"),
    ("Evet", "Yes"),
    ("Hayır", "No"),
    ("Orta", "Medium"),
    ("Tam", "Full"),
    ("Minimal", "Minimal"),
    ("Otomatik", "Automatic"),
    ("Karma", "Hybrid"),
    ("Sınırlı", "Limited"),
    ("Kapsamlı", "Comprehensive"),
    ("Kolay", "Easy"),
    ("Zor", "Difficult"),
    ("Yüksek", "High"),
    ("Düşük", "Low"),
    ("Yok", "None"),
    ("Temel", "Basic"),
    ("Her yerden", "From anywhere"),
    ("Koordine", "Coordinated"),
    ("gerekli", "required"),
    ("bulut", "cloud"),
    ("Birden fazla", "Multiple"),
    ("optimize edilir", "optimized"),
    ("maliyetleri", "costs"),
    ("hafta", "week"),
    ("ay", "month"),
    ("gün", "day"),
    ("yıl", "year"),
    ("Operasyonel Faydalar", "Operational Benefits"),
    ("Finansal Faydalar", "Financial Benefits"),
    ("Stok maliyetleri optimize edilir", "Stock costs are optimized"),
    ("Örnekler", "Examples"),
    ("Ne Zaman Kullanılır", "When to Use"),
    ("Uygulama Süresi", "Implementation Duration"),
    ("Yıllık Gelir", "Annual Income"),
    ("Kullanıcı Sayısı", "Number of Users"),
    ("Özelleştirme", "Customization"),
    ("Çok Uluslu Destek", "Multinational Support"),
    ("Deployment", "Deployment"),
    ("IT Personeli İhtiyacı", "IT Personnel Need"),
];

pub const SEED_FORCED_CATEGORY: &str = super::DEFAULT_CATEGORY;
