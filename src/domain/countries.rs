use crate::domain::model::CountryEntry;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Supported countries, in the order they are read out to the user.
pub static COUNTRIES: [CountryEntry; 6] = [
    CountryEntry {
        key: "mexico",
        display_name: "México",
        currency_code: "MXN",
    },
    CountryEntry {
        key: "canada",
        display_name: "Canadá",
        currency_code: "CAD",
    },
    CountryEntry {
        key: "colombia",
        display_name: "Colombia",
        currency_code: "COP",
    },
    CountryEntry {
        key: "venezuela",
        display_name: "Venezuela",
        currency_code: "VEB",
    },
    CountryEntry {
        key: "argentina",
        display_name: "Argentina",
        currency_code: "ARS",
    },
    CountryEntry {
        key: "chile",
        display_name: "Chile",
        currency_code: "CLP",
    },
];

static BY_KEY: LazyLock<HashMap<&'static str, &'static CountryEntry>> =
    LazyLock::new(|| COUNTRIES.iter().map(|entry| (entry.key, entry)).collect());

/// Accepts the registry key or the spoken name, with or without accents.
pub fn find_country(key: &str) -> Option<&'static CountryEntry> {
    BY_KEY.get(fold_key(key).as_str()).copied()
}

fn fold_key(spoken: &str) -> String {
    spoken
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

pub fn currency_code(key: &str) -> Option<&'static str> {
    find_country(key).map(|entry| entry.currency_code)
}

pub fn display_name(key: &str) -> Option<&'static str> {
    find_country(key).map(|entry| entry.display_name)
}

/// "México, Canadá, ... y Chile"
pub fn list_display_names() -> String {
    let names: Vec<&str> = COUNTRIES.iter().map(|entry| entry.display_name).collect();
    join_spoken(&names, "y")
}

fn join_spoken(items: &[&str], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), conjunction, last),
    }
}
