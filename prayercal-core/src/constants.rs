/// Color of resolved events whose template has no group
pub const DEFAULT_EVENT_COLOR: &str = "green";

/// Color of prayer events unless overridden in settings
pub const DEFAULT_PRAYER_COLOR: &str = "#4A6FA5";

/// Prayer event duration used when settings specify zero minutes
pub const FALLBACK_PRAYER_DURATION_MINUTES: i64 = 30;

/// Number of days fetched from the prayer time API when no range is given
pub const DEFAULT_FETCH_DAYS: i64 = 30;

/// Aladhan calculation method used when none is configured (Muslim World League)
pub const DEFAULT_CALCULATION_METHOD: &str = "3";

/// File name of the ICS export holding the prayer events themselves
pub const PRAYER_EXPORT_NAME: &str = "prayer-events";
