/// Death date values meaning "unknown"
const DEATH_DATE_SENTINELS: &[&str] = &["unknown", "somevalue", "novalue"];

/// Whether a death date value carries no usable date
pub fn is_unknown_date(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || DEATH_DATE_SENTINELS.contains(&value)
        || value.starts_with("_:")
        || value.contains(".well-known/genid")
}

/// Leading year of a date value, e.g. `1828` for `1828-00-00`
fn leading_year(value: &str) -> Option<i32> {
    let value = value.trim().trim_start_matches('+');
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Latest year over a set of death dates, ignoring unknown markers
pub fn death_year<'a>(dates: impl IntoIterator<Item = &'a String>) -> Option<i32> {
    dates
        .into_iter()
        .filter(|d| !is_unknown_date(d))
        .filter_map(|d| leading_year(d))
        .max()
}

/// License clause for the permission field
pub fn format_permission(death_year: Option<i32>, image_license: Option<&str>) -> String {
    let clause = match death_year {
        Some(year) => format!("{{{{PD-Art|PD-old-auto-expired|deathyear={}}}}}", year),
        None => "{{PD-Art|PD-old-100-expired}}".to_string(),
    };
    match image_license.map(str::trim).filter(|l| !l.is_empty()) {
        Some(license) => format!("{}\n{}", clause, license),
        None => clause,
    }
}
