pub mod util;
pub mod validity;
pub mod x5chain;

pub use util::SupportedCurve;
pub use x5chain::{Builder, CertificateWithDer, X5Chain};
