/// Template point-cloud generators.
///
/// `primitives` holds one generator per template plus the shared sphere
/// spiral; `dispatcher` selects among them by [`Template`](crate::Template).
pub mod primitives;
pub mod dispatcher;
