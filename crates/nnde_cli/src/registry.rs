use nnde_core::problems;
use nnde_core::Problem;

/// Built-in problems as `(name, description)`.
pub const PROBLEMS: &[(&str, &str)] = &[
    ("ode00", "dy/dx = 1 - y, y(0) = 0"),
    ("ode00c", "dy/dx = sqrt(1 - y^2), y(0) = 0"),
    ("lagaris01", "Lagaris problem 1, first-order IVP on [0, 1]"),
    ("lagaris03ivp", "y'' + y'/5 + y = -exp(-x/5) cos(x)/5, y(0) = 0, y'(0) = 1"),
    ("ode2_bvp_00", "y'' - y' + 2x - 1 = 0, y(0) = 1, y(1) = 3"),
    ("laplace_bilinear", "Laplace equation, Dirichlet data of 1 + x + 2y + 3xy"),
    ("lagaris05", "Lagaris problem 5, Poisson equation on the unit square"),
];

pub fn problem_by_name(name: &str) -> Option<Problem> {
    let problem = match name {
        "ode00" => problems::relaxation(),
        "ode00c" => problems::circular_arc(),
        "lagaris01" => problems::lagaris01(),
        "lagaris03ivp" => problems::damped_oscillator(),
        "ode2_bvp_00" => problems::quadratic_bvp(),
        "laplace_bilinear" => problems::bilinear_laplace(),
        "lagaris05" => problems::lagaris05(),
        _ => return None,
    };
    Some(problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_problem_resolves() {
        for (name, _) in PROBLEMS {
            assert!(problem_by_name(name).is_some(), "{}", name);
        }
        assert!(problem_by_name("nope").is_none());
    }
}
