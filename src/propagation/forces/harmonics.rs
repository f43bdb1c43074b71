//! Spherical harmonic coefficient tables
//!
//! Coefficients are stored unnormalized in fixed rectangular arrays indexed by
//! `(degree, order)`. Only the lower triangle `m <= n <= degree` is populated;
//! everything else is zero.

use crate::propagation::error::{PropagationError, PropagationResult};

/// Highest degree supported by the closed-form Legendre table
pub const MAX_DEGREE: usize = 4;

const SIZE: usize = MAX_DEGREE + 1;

/// Normalized EGM coefficients C̄(n,m) for n = 2..=4 (rows 0 and 1 are empty)
const EARTH_CBAR: [[f64; SIZE]; SIZE] = [
    [1.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [
        -0.484165143790815e-3,
        -0.206615509074176e-9,
        0.243938357328313e-5,
        0.0,
        0.0,
    ],
    [
        0.957161207093473e-6,
        0.203046201047864e-5,
        0.904787894809528e-6,
        0.721321757121568e-6,
        0.0,
    ],
    [
        0.539965866638991e-6,
        -0.536157389388867e-6,
        0.350501623962649e-6,
        0.990856766672321e-6,
        -0.188519633023033e-6,
    ],
];

/// Normalized EGM coefficients S̄(n,m)
const EARTH_SBAR: [[f64; SIZE]; SIZE] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.138441389137979e-8, -0.140027370385934e-5, 0.0, 0.0],
    [
        0.0,
        0.248200415856872e-6,
        -0.619005475177618e-6,
        0.141434926192941e-5,
        0.0,
    ],
    [
        0.0,
        -0.473567346518086e-6,
        0.662480026275829e-6,
        -0.200956723567452e-6,
        0.308803882149194e-6,
    ],
];

/// Unnormalized C(n,m), S(n,m) tables of a central body's gravity field
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicCoefficients {
    degree: usize,
    c: [[f64; SIZE]; SIZE],
    s: [[f64; SIZE]; SIZE],
}

impl HarmonicCoefficients {
    /// Point mass only: degree 0, C00 = 1
    pub fn point_mass() -> Self {
        let mut c = [[0.0; SIZE]; SIZE];
        c[0][0] = 1.0;
        Self {
            degree: 0,
            c,
            s: [[0.0; SIZE]; SIZE],
        }
    }

    /// Earth's field through degree and order 4
    pub fn earth_egm() -> Self {
        let mut c = [[0.0; SIZE]; SIZE];
        let mut s = [[0.0; SIZE]; SIZE];
        for n in 0..SIZE {
            for m in 0..=n {
                let factor = normalization_factor(n, m);
                c[n][m] = EARTH_CBAR[n][m] * factor;
                s[n][m] = EARTH_SBAR[n][m] * factor;
            }
        }
        Self {
            degree: MAX_DEGREE,
            c,
            s,
        }
    }

    /// Build from unnormalized triangular rows `c[n]`, `s[n]` with `n + 1` entries each
    pub fn from_triangular(c: &[Vec<f64>], s: &[Vec<f64>]) -> PropagationResult<Self> {
        Self::build(c, s, |_, _| 1.0)
    }

    /// Build from fully normalized triangular rows, converting to unnormalized
    pub fn from_normalized(cbar: &[Vec<f64>], sbar: &[Vec<f64>]) -> PropagationResult<Self> {
        Self::build(cbar, sbar, normalization_factor)
    }

    fn build(
        c_rows: &[Vec<f64>],
        s_rows: &[Vec<f64>],
        scale: impl Fn(usize, usize) -> f64,
    ) -> PropagationResult<Self> {
        if c_rows.is_empty() || c_rows.len() != s_rows.len() {
            return Err(PropagationError::invalid_config(format!(
                "C and S tables must have the same non-zero number of rows (got {} and {})",
                c_rows.len(),
                s_rows.len()
            )));
        }
        if c_rows.len() > SIZE {
            return Err(PropagationError::invalid_config(format!(
                "degree {} exceeds the supported maximum of {}",
                c_rows.len() - 1,
                MAX_DEGREE
            )));
        }

        let mut c = [[0.0; SIZE]; SIZE];
        let mut s = [[0.0; SIZE]; SIZE];
        for (n, (c_row, s_row)) in c_rows.iter().zip(s_rows).enumerate() {
            if c_row.len() != n + 1 || s_row.len() != n + 1 {
                return Err(PropagationError::invalid_config(format!(
                    "row {} must have {} entries (C has {}, S has {})",
                    n,
                    n + 1,
                    c_row.len(),
                    s_row.len()
                )));
            }
            for m in 0..=n {
                if !c_row[m].is_finite() || !s_row[m].is_finite() {
                    return Err(PropagationError::invalid_config(format!(
                        "coefficient ({}, {}) is not finite",
                        n, m
                    )));
                }
                let factor = scale(n, m);
                c[n][m] = c_row[m] * factor;
                s[n][m] = s_row[m] * factor;
            }
            if s_row[0] != 0.0 {
                return Err(PropagationError::invalid_config(format!(
                    "S({}, 0) must be zero, got {}",
                    n, s_row[0]
                )));
            }
        }

        if c[0][0] != 1.0 {
            return Err(PropagationError::invalid_config(format!(
                "C(0, 0) must be 1, got {}",
                c[0][0]
            )));
        }

        Ok(Self {
            degree: c_rows.len() - 1,
            c,
            s,
        })
    }

    /// Highest degree present
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Unnormalized (C, S) at degree `n`, order `m`
    pub fn coefficient(&self, n: usize, m: usize) -> PropagationResult<(f64, f64)> {
        if n > self.degree || m > n {
            return Err(PropagationError::invalid_config(format!(
                "coefficient ({}, {}) outside table of degree {}",
                n, m, self.degree
            )));
        }
        Ok((self.c[n][m], self.s[n][m]))
    }

    /// Unchecked access for loops already bounded by `degree`
    pub(crate) fn cs(&self, n: usize, m: usize) -> (f64, f64) {
        (self.c[n][m], self.s[n][m])
    }
}

impl Default for HarmonicCoefficients {
    fn default() -> Self {
        Self::earth_egm()
    }
}

/// Full normalization factor N(n,m) = sqrt((2 - δ_m0)(2n + 1)(n - m)! / (n + m)!)
///
/// Unnormalized = normalized × N(n,m).
pub fn normalization_factor(n: usize, m: usize) -> f64 {
    let delta = if m == 0 { 1.0 } else { 2.0 };
    // (n - m)! / (n + m)! = 1 / ((n - m + 1) ⋯ (n + m))
    let ratio: f64 = ((n - m + 1)..=(n + m)).map(|k| 1.0 / k as f64).product();
    (delta * (2 * n + 1) as f64 * ratio).sqrt()
}

/// Associated Legendre functions P(n,m)(sin φ) for n ≤ 4, m ≤ n + 1
///
/// Closed-form in sin φ and cos φ; `P(n, n + 1)` is zero so the latitude
/// partial can read one order past the diagonal. A field of higher degree needs
/// the general recursion instead of this table.
pub fn legendre_table(latitude: f64) -> [[f64; SIZE + 1]; SIZE] {
    let (sin_phi, cos_phi) = latitude.sin_cos();
    let sin2 = sin_phi * sin_phi;
    let cos2 = cos_phi * cos_phi;

    [
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [sin_phi, cos_phi, 0.0, 0.0, 0.0, 0.0],
        [
            (3.0 * sin2 - 1.0) * 0.5,
            3.0 * sin_phi * cos_phi,
            3.0 * cos2,
            0.0,
            0.0,
            0.0,
        ],
        [
            sin_phi * (5.0 * sin2 - 3.0) * 0.5,
            (15.0 * sin2 - 3.0) * cos_phi * 0.5,
            15.0 * sin_phi * cos2,
            15.0 * cos2 * cos_phi,
            0.0,
            0.0,
        ],
        [
            0.125 * (35.0 * sin2 * sin2 - 30.0 * sin2 + 3.0),
            2.5 * (7.0 * sin2 * sin_phi - 3.0 * sin_phi) * cos_phi,
            (7.0 * sin2 - 1.0) * cos2 * 7.5,
            105.0 * cos_phi * cos2 * sin_phi,
            105.0 * cos2 * cos2,
            0.0,
        ],
    ]
}
