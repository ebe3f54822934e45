//! Print a temperature profile and a coarse error grid as CSV.
//!
//! ```text
//! cargo run --example heat_profile -- 6 0.5
//! ```
//!
//! Arguments are the number of interior nodes (default 6) and `τ` in seconds
//! (default 0.5).

use collocation::{Collocation, CollocationSettings, HeatParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(6);
    let tau: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0.5);

    let params = HeatParams::<f64>::default();
    let solved = Collocation::solve(n, &CollocationSettings::<f64>::default())?;
    let cmp = solved.compare(params)?;

    // 100 points per metre
    let points = ((100.0 * params.length) as usize).max(2);
    let profile = cmp.profile(tau, points)?;
    let mut csv = String::new();
    profile.write_csv(&mut csv)?;
    print!("{csv}");
    eprintln!(
        "n = {n}, tau = {tau}: {:?} operators, max |T_exact - T_num| = {:.6} K",
        solved.operators().branch(),
        profile.max_abs_error()
    );

    let grid = cmp.error_grid(11, 100.0 * tau, 5)?;
    let mut csv = String::new();
    grid.write_csv(&mut csv)?;
    println!();
    print!("{csv}");
    Ok(())
}
