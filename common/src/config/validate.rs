pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Checks `value` against an inclusive range, naming the field in the error.
pub fn check_range<T>(name: &str, value: T, min: T, max: T) -> Result<(), String>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(format!("{} must be between {} and {}, got {}", name, min, max, value));
    }
    Ok(())
}
