//! Static two-locale string table for dynamic content.
//!
//! Lookup order: declared locale, then English, then the key itself.

/// Locales the string table carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lang {
	/// English, the fallback locale.
	#[default]
	En,
	/// Simplified Chinese.
	Zh,
}

impl Lang {
	/// Parse a BCP-47-ish language tag. Anything that is not Chinese falls
	/// back to English, which doubles as the undeclared-locale default.
	pub fn parse(tag: &str) -> Self {
		if tag.to_ascii_lowercase().starts_with("zh") {
			Lang::Zh
		} else {
			Lang::En
		}
	}
}

/// Current language as declared on the document element, defaulting to English.
#[cfg(target_arch = "wasm32")]
pub fn current_lang() -> Lang {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.and_then(|el| el.get_attribute("lang"))
		.map(|tag| Lang::parse(&tag))
		.unwrap_or_default()
}

/// Off-browser builds (native test runs) have no document to consult.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_lang() -> Lang {
	Lang::default()
}

fn en(key: &str) -> Option<&'static str> {
	Some(match key {
		"property_label" => "Property",
		"flavor_label" => "Flavor",
		"meridian_label" => "Meridian",
		"efficacy_label" => "Efficacy",
		"categories_label" => "Categories",
		"no_description" => "No description available.",
		"no_materials" => "No materials found for this prescription.",
		"none_specified" => "None specified",
		"loading" => "Loading...",
		"network_error" => "Network response was not ok",
		"load_error" => "Failed to load prescription details. Please try again.",
		"medicinal_materials_heading" => "Medicinal Materials",
		"not_available" => "N/A",
		"select_medicinal_materials" => "Select medicinal materials",
		"enter_efficacy_categories" => "Enter efficacy categories",
		"select_a_medicinal_material" => "Select a medicinal material",
		"select_an_efficacy_category" => "Select an efficacy category",
		"select_base_materials" => "Select base materials (optional)",
		_ => return None,
	})
}

fn zh(key: &str) -> Option<&'static str> {
	Some(match key {
		"property_label" => "性质",
		"flavor_label" => "味道",
		"meridian_label" => "归经",
		"efficacy_label" => "功效",
		"categories_label" => "分类",
		"no_description" => "暂无描述。",
		"no_materials" => "未找到该处方的药材。",
		"none_specified" => "未指定",
		"loading" => "加载中...",
		"network_error" => "网络响应异常",
		"load_error" => "加载处方详情失败。请重试。",
		"medicinal_materials_heading" => "药材",
		"not_available" => "无",
		"select_medicinal_materials" => "选择药材",
		"enter_efficacy_categories" => "输入功效分类",
		"select_a_medicinal_material" => "选择一种药材",
		"select_an_efficacy_category" => "选择一个功效分类",
		"select_base_materials" => "选择基础药材（可选）",
		_ => return None,
	})
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
	match lang {
		Lang::En => en(key),
		Lang::Zh => zh(key),
	}
}

/// Translate `key` for an explicit locale, falling back to English, then to
/// the key itself.
pub fn tr_in(lang: Lang, key: &str) -> String {
	lookup(lang, key)
		.or_else(|| lookup(Lang::En, key))
		.map(str::to_owned)
		.unwrap_or_else(|| key.to_owned())
}

/// Translate `key` for the document's declared language.
pub fn tr(key: &str) -> String {
	tr_in(current_lang(), key)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_key_resolves_in_each_locale() {
		assert_eq!(tr_in(Lang::En, "loading"), "Loading...");
		assert_eq!(tr_in(Lang::Zh, "loading"), "加载中...");
	}

	#[test]
	fn unknown_key_returns_the_key_itself() {
		assert_eq!(tr_in(Lang::En, "no_such_key"), "no_such_key");
		assert_eq!(tr_in(Lang::Zh, "no_such_key"), "no_such_key");
	}

	#[test]
	fn undeclared_locale_falls_back_to_english() {
		assert_eq!(Lang::parse("fr"), Lang::En);
		assert_eq!(tr_in(Lang::parse("fr"), "not_available"), "N/A");
	}

	#[test]
	fn chinese_tags_parse_to_zh() {
		assert_eq!(Lang::parse("zh"), Lang::Zh);
		assert_eq!(Lang::parse("zh-CN"), Lang::Zh);
		assert_eq!(Lang::parse("en-US"), Lang::En);
	}
}
