use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Unknown codes fall back to english. Region suffixes (`es-ES`, `en_US`) are ignored.
    pub fn from_code(code: &str) -> Self {
        let language = code.split(['-', '_']).next().unwrap_or_default().to_lowercase();
        language.parse().unwrap_or_default()
    }

    pub fn chrono_locale(&self) -> chrono::Locale {
        match self {
            Locale::En => chrono::Locale::en_US,
            Locale::Es => chrono::Locale::es_ES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationKey {
    NotAvailable,
    UnknownCharacter,
    /// contains the placeholders `FLEET_START` and `FLEET_END`
    FleetTrackingHint,
    LessThanAMinute,
    Day,
    Days,
    Hour,
    Hours,
    Minute,
    Minutes,
}

pub fn translate(locale: Locale, key: TranslationKey) -> &'static str {
    use TranslationKey::*;

    match locale {
        Locale::En => match key {
            NotAvailable => "Not available",
            UnknownCharacter => "Unknown character",
            FleetTrackingHint => "Fleet tracked from FLEET_START to FLEET_END",
            LessThanAMinute => "less than a minute",
            Day => "day",
            Days => "days",
            Hour => "hour",
            Hours => "hours",
            Minute => "minute",
            Minutes => "minutes",
        },
        Locale::Es => match key {
            NotAvailable => "No disponible",
            UnknownCharacter => "Personaje desconocido",
            FleetTrackingHint => "Flota rastreada desde FLEET_START hasta FLEET_END",
            LessThanAMinute => "menos de un minuto",
            Day => "día",
            Days => "días",
            Hour => "hora",
            Hours => "horas",
            Minute => "minuto",
            Minutes => "minutos",
        },
    }
}
