/// Identification and documentation metadata of a use case (form step)
pub trait UseCaseMetadata {
    /// Use case index, e.g. "u508"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "creative_direction"
    fn usecase_name() -> &'static str;

    /// Name shown in the UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Full name like "u508_creative_direction"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
