//! Service layer providing the movie catalog operations on top of `models`.
//! - `MovieRepository` hides persistence; `SeaOrmMovieRepository` is the real store.
//! - `MovieService` owns input validation and not-found policy.

pub mod errors;
pub mod movie;
#[cfg(test)]
pub mod test_support;
