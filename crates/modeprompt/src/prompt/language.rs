//! Host locale normalisation.

/// Normalise a host locale to a language code: lower-case language,
/// upper-case region (`"pt-br"` -> `"pt-BR"`, `"EN"` -> `"en"`). An empty
/// locale means English.
pub fn format_language(locale: &str) -> String {
    let locale = locale.trim().replace('_', "-");
    if locale.is_empty() {
        return "en".to_string();
    }
    match locale.split_once('-') {
        Some((lang, region)) if !region.is_empty() => {
            format!("{}-{}", lang.to_ascii_lowercase(), region.to_ascii_uppercase())
        }
        Some((lang, _)) => lang.to_ascii_lowercase(),
        None => locale.to_ascii_lowercase(),
    }
}

/// Display name of a language code, or the code itself when unknown.
pub fn language_name(code: &str) -> &str {
    match code {
        "ca" => "Català",
        "de" => "Deutsch",
        "en" => "English",
        "es" => "Español",
        "fr" => "Français",
        "hi" => "हिन्दी",
        "it" => "Italiano",
        "ja" => "日本語",
        "ko" => "한국어",
        "nl" => "Nederlands",
        "pl" => "Polski",
        "pt-BR" => "Português",
        "ru" => "Русский",
        "tr" => "Türkçe",
        "vi" => "Tiếng Việt",
        "zh-CN" => "简体中文",
        "zh-TW" => "繁體中文",
        other => other,
    }
}
