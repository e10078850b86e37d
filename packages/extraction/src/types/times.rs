use serde::{Deserialize, Serialize};

/// One of the five daily prayers.
///
/// Jummah is not a daily prayer; it is carried separately on [`DailyTimes`]
/// because sources publish it as a fixed weekly constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// Daily prayers in timetable column order.
    pub const DAILY: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }

    /// Lowercase spellings seen on mosque websites.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Prayer::Fajr => &["fajr", "fajar", "fajir"],
            Prayer::Dhuhr => &["dhuhr", "zuhr", "zohr", "duhr", "dhuhur", "zuhar"],
            Prayer::Asr => &["asr", "asar"],
            Prayer::Maghrib => &["maghrib", "magrib", "maghreb"],
            Prayer::Isha => &["isha", "esha", "ishaa"],
        }
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prayer times for a single day, as free-form strings (ideally `HH:MM`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTimes {
    pub fajr: Option<String>,
    pub dhuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
    pub jummah: Option<String>,
}

impl DailyTimes {
    /// Build a fully populated record from fixed values.
    pub fn fixed(daily: [&str; 5], jummah: &str) -> Self {
        let [fajr, dhuhr, asr, maghrib, isha] = daily;
        Self {
            fajr: Some(fajr.to_string()),
            dhuhr: Some(dhuhr.to_string()),
            asr: Some(asr.to_string()),
            maghrib: Some(maghrib.to_string()),
            isha: Some(isha.to_string()),
            jummah: Some(jummah.to_string()),
        }
    }

    pub fn get(&self, prayer: Prayer) -> Option<&str> {
        self.slot(prayer).as_deref()
    }

    pub fn set(&mut self, prayer: Prayer, value: impl Into<String>) {
        *self.slot_mut(prayer) = Some(value.into());
    }

    /// Number of daily prayers with a non-blank value.
    pub fn daily_count(&self) -> usize {
        Prayer::DAILY
            .iter()
            .filter(|p| self.get(**p).is_some_and(|v| !v.trim().is_empty()))
            .count()
    }

    /// True when all five daily prayers are present.
    pub fn is_complete(&self) -> bool {
        self.daily_count() == Prayer::DAILY.len()
    }

    /// True when no field (including jummah) carries a value.
    pub fn is_empty(&self) -> bool {
        self.daily_count() == 0 && self.jummah.as_deref().map_or(true, |j| j.trim().is_empty())
    }

    /// Fill blank fields from `other`, keeping anything already present.
    pub fn fill_missing_from(&mut self, other: &DailyTimes) {
        for prayer in Prayer::DAILY {
            let blank = self.get(prayer).map_or(true, |v| v.trim().is_empty());
            if blank {
                if let Some(value) = other.get(prayer) {
                    self.set(prayer, value);
                }
            }
        }
        if self.jummah.as_deref().map_or(true, |j| j.trim().is_empty()) {
            self.jummah = other.jummah.clone();
        }
    }

    pub fn with_jummah(mut self, jummah: Option<String>) -> Self {
        if jummah.is_some() {
            self.jummah = jummah;
        }
        self
    }

    fn slot(&self, prayer: Prayer) -> &Option<String> {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }

    fn slot_mut(&mut self, prayer: Prayer) -> &mut Option<String> {
        match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        }
    }
}
