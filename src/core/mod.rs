use rand::distr::{Alphanumeric, SampleString};

pub mod pipeline;

pub mod record;

pub mod report;

pub mod validation;

/// Generates a random name consisting of alphanumeric characters.
///
/// # Returns
///
/// A `String` containing the generated random name.
fn build_name() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 8)
}
