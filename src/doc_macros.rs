//! Macros used for generating documentation

/// Generates the doc-comment for the `rayon` variant of a function. Takes
/// the name of the sequential function as a string literal.
macro_rules! generate_parallel_doc_comment {
    ($name:literal) => {
        concat!(
            "A parallel version of [`",
            $name,
            "()`].\n\nProduces exactly the same output as [`",
            $name,
            "()`], in the same order, but spreads the work over the rayon\nthread pool."
        )
    };
}
