//! Age-adjusted minimum alveolar concentration of sevoflurane.

/// Sevoflurane MAC at age 40, in volume percent.
const MAC40: f64 = 1.80;

/// Decline of MAC per year of age (log10 units).
const AGE_SLOPE: f64 = -0.00269;

/// Age-corrected 1.0 MAC for a patient of `age` years.
pub fn mac_divisor(age: f64) -> f64 {
    MAC40 * 10f64.powf(AGE_SLOPE * (age - 40.0))
}

/// Converts an end-tidal concentration into multiples of age-adjusted MAC.
pub fn age_adjusted_mac(raw: f64, age: f64) -> f64 {
    raw / mac_divisor(age)
}
