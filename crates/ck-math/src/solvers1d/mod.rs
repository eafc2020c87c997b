//! 1D root-finding solvers.
//!
//! All solvers work on a sign-changing [`Bracket`] and stop after a fixed
//! iteration budget.  Objective functions may be fallible (`FnMut(Real) ->
//! Result<Real>`): an error from the objective aborts the search and is
//! returned unchanged.  Running out of iterations yields
//! [`Error::NoConvergence`] carrying the last trial point and its residual.

use ck_core::{
    errors::{Error, Result},
    Real,
};

/// Iteration budget used by the convenience wrappers.
pub const MAX_ITERATIONS: usize = 100;

/// Accuracy used when a non-positive accuracy is requested.
pub const DEFAULT_ACCURACY: Real = 1.0e-11;

/// Growth factor applied to the bracket width when searching for a sign change.
const BRACKET_GROWTH: Real = 1.6;

/// Root-finding algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    /// Brent's method: bisection, secant, and inverse quadratic steps.
    #[default]
    Brent,
    /// Plain bisection.
    Bisection,
}

/// An interval `[lower, upper]` whose end values have opposite signs (or one
/// of them is zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lower end.
    pub lower: Real,
    /// Upper end.
    pub upper: Real,
    /// `f(lower)`.
    pub f_lower: Real,
    /// `f(upper)`.
    pub f_upper: Real,
}

/// A converged root together with the work it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutcome {
    /// The root estimate.
    pub root: Real,
    /// Function value at `root`.
    pub residual: Real,
    /// Objective evaluations spent inside the solver loop.
    pub iterations: usize,
}

fn finite_or_err(x: Real, fx: Real) -> Result<Real> {
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(Error::Runtime(format!("objective is not finite at x = {x} (f = {fx})")))
    }
}

fn effective_accuracy(accuracy: Real) -> Real {
    if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    }
}

// ── Bracketing ───────────────────────────────────────────────────────────────

/// Widen `[x_min, x_max]` until `f` changes sign across it.
///
/// At each step the end with the smaller `|f|` is pushed outward by
/// 1.6 × the current width.
///
/// # Errors
/// `NoConvergence` if no sign change is found within `max_expansions`
/// steps, `Runtime` if `f` is not finite at a trial point, or any error
/// raised by `f`.
pub fn bracket_root<F>(mut f: F, x_min: Real, x_max: Real, max_expansions: usize) -> Result<Bracket>
where
    F: FnMut(Real) -> Result<Real>,
{
    ck_core::ensure!(x_min < x_max, "invalid bracket [{x_min}, {x_max}]");
    let (mut lower, mut upper) = (x_min, x_max);
    let mut f_lower = finite_or_err(lower, f(lower)?)?;
    let mut f_upper = finite_or_err(upper, f(upper)?)?;

    for _ in 0..max_expansions {
        if f_lower * f_upper <= 0.0 {
            break;
        }
        if f_lower.abs() < f_upper.abs() {
            lower += BRACKET_GROWTH * (lower - upper);
            f_lower = finite_or_err(lower, f(lower)?)?;
        } else {
            upper += BRACKET_GROWTH * (upper - lower);
            f_upper = finite_or_err(upper, f(upper)?)?;
        }
    }

    if f_lower * f_upper <= 0.0 {
        Ok(Bracket {
            lower,
            upper,
            f_lower,
            f_upper,
        })
    } else {
        let (last_x, last_residual) = if f_lower.abs() < f_upper.abs() {
            (lower, f_lower)
        } else {
            (upper, f_upper)
        };
        Err(Error::NoConvergence {
            iterations: max_expansions,
            last_x,
            last_residual,
        })
    }
}

impl SolverKind {
    /// Solve `f(x) = 0` inside `bracket` with this algorithm.
    pub fn solve_in<F>(
        self,
        f: F,
        bracket: Bracket,
        accuracy: Real,
        max_iterations: usize,
    ) -> Result<SolverOutcome>
    where
        F: FnMut(Real) -> Result<Real>,
    {
        match self {
            SolverKind::Brent => try_brent_in(f, bracket, accuracy, max_iterations),
            SolverKind::Bisection => try_bisection_in(f, bracket, accuracy, max_iterations),
        }
    }
}

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    try_brent(|x| Ok(f(x)), x_min, x_max, accuracy, MAX_ITERATIONS).map(|o| o.root)
}

/// Brent's method for a fallible objective with an explicit iteration budget.
pub fn try_brent<F>(
    mut f: F,
    x_min: Real,
    x_max: Real,
    accuracy: Real,
    max_iterations: usize,
) -> Result<SolverOutcome>
where
    F: FnMut(Real) -> Result<Real>,
{
    let f_lower = finite_or_err(x_min, f(x_min)?)?;
    let f_upper = finite_or_err(x_max, f(x_max)?)?;
    if f_lower * f_upper > 0.0 {
        return Err(Error::Precondition(format!(
            "Brent: f({x_min}) = {f_lower} and f({x_max}) = {f_upper} must have opposite signs"
        )));
    }
    try_brent_in(
        f,
        Bracket {
            lower: x_min,
            upper: x_max,
            f_lower,
            f_upper,
        },
        accuracy,
        max_iterations,
    )
}

/// Brent's method inside an already evaluated bracket.
///
/// Converges when the bracket half-width drops below the accuracy or
/// `|f(x)| <= accuracy`.
pub fn try_brent_in<F>(
    mut f: F,
    bracket: Bracket,
    accuracy: Real,
    max_iterations: usize,
) -> Result<SolverOutcome>
where
    F: FnMut(Real) -> Result<Real>,
{
    let acc = effective_accuracy(accuracy);
    let Bracket {
        lower: mut a,
        upper: mut b,
        f_lower: mut fa,
        f_upper: mut fb,
    } = bracket;

    if fa == 0.0 {
        return Ok(SolverOutcome {
            root: a,
            residual: fa,
            iterations: 0,
        });
    }
    if fb == 0.0 {
        return Ok(SolverOutcome {
            root: b,
            residual: fb,
            iterations: 0,
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..max_iterations {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb.abs() <= acc {
            return Ok(SolverOutcome {
                root: b,
                residual: fb,
                iterations: iteration,
            });
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Attempt inverse quadratic interpolation
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                let p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                let q = (q - 1.0) * (r - 1.0) * (s - 1.0);
                (p, q)
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = finite_or_err(b, f(b)?)?;
    }
    Err(Error::NoConvergence {
        iterations: max_iterations,
        last_x: b,
        last_residual: fb,
    })
}

// ── Bisection ────────────────────────────────────────────────────────────────

/// Simple bisection method.
pub fn bisection<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let f_lower = f(x_min);
    let f_upper = f(x_max);
    if f_lower * f_upper > 0.0 {
        return Err(Error::Precondition(
            "Bisection: f(x_min) and f(x_max) must have opposite signs".into(),
        ));
    }
    try_bisection_in(
        |x| Ok(f(x)),
        Bracket {
            lower: x_min,
            upper: x_max,
            f_lower,
            f_upper,
        },
        accuracy,
        MAX_ITERATIONS,
    )
    .map(|o| o.root)
}

/// Bisection inside an already evaluated bracket.
pub fn try_bisection_in<F>(
    mut f: F,
    bracket: Bracket,
    accuracy: Real,
    max_iterations: usize,
) -> Result<SolverOutcome>
where
    F: FnMut(Real) -> Result<Real>,
{
    let acc = effective_accuracy(accuracy);
    let Bracket {
        lower: mut a,
        upper: mut b,
        f_lower: mut fa,
        f_upper: fb,
    } = bracket;

    if fa == 0.0 {
        return Ok(SolverOutcome {
            root: a,
            residual: fa,
            iterations: 0,
        });
    }
    if fb == 0.0 {
        return Ok(SolverOutcome {
            root: b,
            residual: fb,
            iterations: 0,
        });
    }

    let mut mid = 0.5 * (a + b);
    let mut fm = fa;
    for iteration in 0..max_iterations {
        mid = 0.5 * (a + b);
        fm = finite_or_err(mid, f(mid)?)?;
        if fm == 0.0 || (b - a).abs() * 0.5 < acc {
            return Ok(SolverOutcome {
                root: mid,
                residual: fm,
                iterations: iteration + 1,
            });
        }
        if fm * fa > 0.0 {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    Err(Error::NoConvergence {
        iterations: max_iterations,
        last_x: mid,
        last_residual: fm,
    })
}
