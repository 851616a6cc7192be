// src/locale.rs
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Ar,
}

pub const LOCALES: &[Locale] = &[Locale::En, Locale::Ar];

impl Locale {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Text direction for the `dir` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Locale::En => "ltr",
            Locale::Ar => "rtl",
        }
    }

    /// The locale named by the first path segment, if any.
    pub fn from_path(path: &str) -> Option<Self> {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .and_then(Self::from_code)
    }

    /// Rewrite the leading locale segment of `path_and_query` to `self`.
    /// Paths without a locale segment get one prepended.
    pub fn switch_path(self, path_and_query: &str) -> String {
        let (path, query) = match path_and_query.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path_and_query, None),
        };

        let rest = path.trim_start_matches('/');
        let rest = match rest.split_once('/') {
            Some((first, tail)) if Self::from_code(first).is_some() => tail,
            None if Self::from_code(rest).is_some() => "",
            _ => rest,
        };

        let mut out = format!("/{}", self.code());
        if !rest.is_empty() {
            out.push('/');
            out.push_str(rest);
        }
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            out.push('?');
            out.push_str(q);
        }
        out
    }

    /// Look up a UI label. Unknown keys render as the key itself.
    pub fn t<'a>(self, key: &'a str) -> &'a str {
        match CATALOG.iter().find(|(k, _, _)| *k == key) {
            Some((_, en, ar)) => match self {
                Locale::En => *en,
                Locale::Ar => *ar,
            },
            None => key,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// (key, en, ar)
const CATALOG: &[(&str, &str, &str)] = &[
    ("metadata.title", "Enjoy Spot | Yachts", "إنجوي سبوت | اليخوت"),
    ("categories.yachts", "Yachts", "اليخوت"),
    ("categories.watersports", "Watersports", "الرياضات المائية"),
    ("categories.helicopters", "Helicopters", "الهليكوبتر"),
    ("categories.desert", "Desert", "الصحراء"),
    ("categories.search", "Search", "بحث"),
    ("categories.share", "Share", "مشاركة"),
    ("categories.book_now", "Book now", "احجز الآن"),
    ("categories.contact_us", "Contact us", "اتصل بنا"),
    ("categories.help_center", "Help center", "مركز المساعدة"),
    ("categories.manage_bookings", "Manage bookings", "إدارة الحجوزات"),
    ("categories.privacy_policy", "Privacy policy", "سياسة الخصوصية"),
    ("categories.terms_and_conditions", "Terms and conditions", "الشروط والأحكام"),
    ("filters.select_city", "Select city", "اختر المدينة"),
    ("filters.select_location", "Select location", "اختر الموقع"),
    ("filters.select_type", "Select type", "اختر النوع"),
    ("filters.select_category", "Select category", "اختر الفئة"),
    ("filters.sort_by", "Sort by", "ترتيب حسب"),
    ("filters.min_price", "Min price", "أقل سعر"),
    ("filters.max_price", "Max price", "أعلى سعر"),
    ("filters.search_placeholder", "Search listings", "ابحث في القوائم"),
    ("filters.reset", "Reset", "إعادة تعيين"),
    ("yacht.guests", "Guests", "ضيوف"),
    ("yacht.cabins", "Cabins", "كبائن"),
    ("yacht.length", "ft", "قدم"),
    ("yacht.per_person", "AED / person", "درهم / شخص"),
    ("yacht.per_hour", "AED / hour", "درهم / ساعة"),
    ("listings.empty", "No listings match your search.", "لا توجد نتائج مطابقة لبحثك."),
    ("listings.total", "results", "نتيجة"),
    ("common.login", "Login", "تسجيل الدخول"),
    ("common.logout", "Sign out", "تسجيل الخروج"),
    ("auth.sign_in", "Sign in", "تسجيل الدخول"),
    ("auth.sign_in_description", "Sign in to book your next trip.", "سجل الدخول لحجز رحلتك القادمة."),
    ("auth.email", "Email", "البريد الإلكتروني"),
    ("auth.email_placeholder", "you@example.com", "you@example.com"),
    ("auth.password", "Password", "كلمة المرور"),
    ("auth.password_placeholder", "Your password", "كلمة المرور"),
    ("auth.invalid_email", "Please enter a valid email address", "يرجى إدخال بريد إلكتروني صحيح"),
    ("auth.password_too_short", "Password must be at least 6 characters", "يجب أن تتكون كلمة المرور من 6 أحرف على الأقل"),
    ("auth.invalid_credentials", "Invalid credentials", "بيانات الدخول غير صحيحة"),
    ("auth.generic_error", "Something went wrong. Please try again.", "حدث خطأ ما. يرجى المحاولة مرة أخرى."),
    ("listings.loading", "Loading...", "جار التحميل..."),
    ("filters.all_cities", "All cities", "كل المدن"),
    ("filters.all_locations", "All locations", "كل المواقع"),
    ("filters.all_types", "All types", "كل الأنواع"),
    ("filters.all_categories", "All categories", "كل الفئات"),
    ("filters.has_offer", "Offers only", "العروض فقط"),
    ("filters.all_offers", "All prices", "كل الأسعار"),
    ("filters.apply", "Apply", "تطبيق"),
    ("pagination.previous", "Previous", "السابق"),
    ("pagination.next", "Next", "التالي"),
    ("footer.rights", "All rights reserved.", "جميع الحقوق محفوظة."),
];
