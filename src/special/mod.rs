//! Special mathematical functions.
//!
//! The analytical reference for the heat equation is built on the error
//! function. It is generic over [`FloatScalar`](crate::FloatScalar)
//! (f32/f64) and no-std compatible.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`erf`] | Error function |
//!
//! # Example
//!
//! ```
//! use collocation::special::erf;
//!
//! // erf is odd and saturates at ±1
//! assert!((erf(0.3_f64) + erf(-0.3)).abs() < 1e-16);
//! assert_eq!(erf(-8.0_f64), -1.0);
//! ```

mod erf_fn;


pub use erf_fn::erf;
