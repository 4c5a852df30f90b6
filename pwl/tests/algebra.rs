// This file is part of Searchcost.
// Copyright © 2025 The Searchcost developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Randomized tests of the piecewise-linear algebra against pointwise evaluation.
use pwl::*;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

const NB_DRAWS: usize = 2000;

/// Number of `x` values checked after the largest breakpoint.
const CHECK_DISTANCE: i64 = 60;

fn random_piecewise(rng: &mut XorShiftRng, min_slope: i64, min_intercept: i64) -> Piecewise {
    let n = rng.gen_range(1..=10);
    let mut lower_bound = 1;
    let mut segments = Vec::with_capacity(n);
    for i in 0..n {
        if i > 0 {
            lower_bound += rng.gen_range(1..=10);
        }
        let f = Linear::new(
            rng.gen_range(min_slope..=8),
            rng.gen_range(min_intercept..=8),
        );
        segments.push(Segment::new(lower_bound, f));
    }
    Piecewise::from_segments(segments).unwrap()
}

fn check_range(f: &Piecewise, g: &Piecewise) -> impl Iterator<Item = i64> {
    let last = f.last_lower_bound().max(g.last_lower_bound()) + CHECK_DISTANCE;
    (1..=last).chain([1_000, 100_000])
}

#[test]
fn random_min_max_test() {
    let mut rng = XorShiftRng::seed_from_u64(99);
    for _ in 0..NB_DRAWS {
        let f = random_piecewise(&mut rng, 0, 0);
        let g = random_piecewise(&mut rng, 0, 0);
        let min = f.min(&g);
        let max = f.max(&g);
        assert!(min.is_normalized(), "min({f}; {g}) = {min}");
        assert!(max.is_normalized(), "max({f}; {g}) = {max}");
        for x in check_range(&f, &g) {
            let (fx, gx) = (f.eval(x), g.eval(x));
            assert_eq!(min.eval(x), fx.min(gx), "min({f}; {g}) = {min} at x = {x}");
            assert_eq!(max.eval(x), fx.max(gx), "max({f}; {g}) = {max} at x = {x}");
        }
    }
}

#[test]
fn random_min_max_negative_coefficients_test() {
    let mut rng = XorShiftRng::seed_from_u64(13);
    for _ in 0..NB_DRAWS {
        let f = random_piecewise(&mut rng, -8, -20);
        let g = random_piecewise(&mut rng, -8, -20);
        let min = f.min(&g);
        let max = f.max(&g);
        for x in check_range(&f, &g) {
            let (fx, gx) = (f.eval(x), g.eval(x));
            assert_eq!(min.eval(x), fx.min(gx), "min({f}; {g}) = {min} at x = {x}");
            assert_eq!(max.eval(x), fx.max(gx), "max({f}; {g}) = {max} at x = {x}");
        }
    }
}

#[test]
fn min_max_symmetry_test() {
    let mut rng = XorShiftRng::seed_from_u64(7);
    for _ in 0..NB_DRAWS {
        let f = random_piecewise(&mut rng, 0, 0);
        let g = random_piecewise(&mut rng, 0, 0);
        let (min_fg, min_gf) = (f.min(&g), g.min(&f));
        let (max_fg, max_gf) = (f.max(&g), g.max(&f));
        for x in check_range(&f, &g) {
            assert_eq!(min_fg.eval(x), min_gf.eval(x));
            assert_eq!(max_fg.eval(x), max_gf.eval(x));
        }
        assert_eq!(f.min(&f), f.normalized());
        assert_eq!(f.max(&f), f.normalized());
    }
}

#[test]
fn random_add_subtract_test() {
    let mut rng = XorShiftRng::seed_from_u64(23);
    for _ in 0..NB_DRAWS {
        let f = random_piecewise(&mut rng, -8, -8);
        let g = random_piecewise(&mut rng, -8, -8);
        let sum = f.add(&g);
        let diff = f.subtract(&g);
        assert!(sum.is_normalized());
        assert!(diff.is_normalized());
        for x in check_range(&f, &g) {
            assert_eq!(sum.eval(x), f.eval(x) + g.eval(x));
            assert_eq!(diff.eval(x), f.eval(x) - g.eval(x));
        }
        assert!(f.subtract(&f).is_zero());
        assert_eq!(diff.add(&g), f.normalized());
    }
}

#[test]
fn random_offset_test() {
    let mut rng = XorShiftRng::seed_from_u64(5);
    for _ in 0..NB_DRAWS {
        let f = random_piecewise(&mut rng, 0, 0);
        let n = rng.gen_range(0..=f.last_lower_bound() + 5);
        let c = rng.gen_range(-10..=10);
        let g = f.offset_x(n);
        let h = f.offset_y(c);
        assert_eq!(g.segments()[0].lower_bound, 1);
        assert!(g.num_segments() <= f.num_segments());
        for x in check_range(&f, &f) {
            assert_eq!(g.eval(x), f.eval(x + n));
            assert_eq!(h.eval(x), f.eval(x) + c);
        }
    }
}

#[test]
fn compose_follows_plan_test() {
    let mut rng = XorShiftRng::seed_from_u64(31);
    for _ in 0..NB_DRAWS {
        let f = random_piecewise(&mut rng, 0, 0);
        let g = random_piecewise(&mut rng, 0, 0);
        let start = if rng.gen_bool(0.5) {
            Source::First
        } else {
            Source::Second
        };
        let mut switches = Vec::new();
        let mut x = 1;
        for _ in 0..rng.gen_range(0..6) {
            x += rng.gen_range(1..=12);
            switches.push(x);
        }
        let plan = ComposePlan::new(start, switches);
        let h = compose(&f, &g, &plan);
        assert!(h.is_normalized());
        for x in check_range(&f, &g) {
            let expected = match plan.source_at(x) {
                Source::First => f.eval(x),
                Source::Second => g.eval(x),
            };
            assert_eq!(h.eval(x), expected, "compose({f}; {g}; {plan:?}) = {h}");
        }
    }
}

#[test]
fn parse_display_test() {
    let mut rng = XorShiftRng::seed_from_u64(2);
    for _ in 0..200 {
        let f = random_piecewise(&mut rng, -8, -8);
        let g: Piecewise = f.to_string().parse().unwrap();
        assert_eq!(f, g);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(serde_json::from_str::<Piecewise>(&json).unwrap(), f);
    }
}
