//! Nonconformity scores.

pub fn absolute(y: f64, y_hat: f64) -> f64 {
    (y - y_hat).abs()
}

pub fn signed(y: f64, y_hat: f64) -> f64 {
    y - y_hat
}

pub fn normalized(y: f64, y_hat: f64, scale: f64) -> f64 {
    (y - y_hat).abs() / scale
}

/// CQR score `max(lo − y, y − hi)`; negative inside the band.
pub fn quantile_band(y: f64, lo: f64, hi: f64) -> f64 {
    (lo - y).max(y - hi)
}

/// `1 − p̂(y | x)`.
pub fn classification(p_true: f64) -> f64 {
    1.0 - p_true
}
