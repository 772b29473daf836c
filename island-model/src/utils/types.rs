#[cfg(test)]
#[path = "../../tests/unit/utils/types_test.rs"]
mod types_test;

/// Alias to a scalar floating type used for decision, fitness and constraint vectors.
pub type Float = f64;

/// A decision vector type.
pub type DecisionVector = Vec<Float>;

/// A fitness vector type.
pub type FitnessVector = Vec<Float>;

/// A constraint vector type.
pub type ConstraintVector = Vec<Float>;

/// Returns a short name of a type.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let name = std::any::type_name::<T>();
    let name = name.split_once('<').map(|(name, _)| name).unwrap_or(name);

    name.rsplit_once(':').map(|(_, name)| name).unwrap_or(name)
}

/// Formats a vector of floats as a comma separated list with fixed precision.
pub fn format_floats(values: &[Float]) -> String {
    values.iter().map(|v| format!("{v:.7}")).collect::<Vec<_>>().join(",")
}
