//! Closed-loop behavior of the teaching scenarios.

use gk_core::units::{kg, kgps};
use gk_sim::{CartPlant, IntegratorType, SimulationParameters, simulate, simulate_with};

#[test]
fn well_damped_twin_settles_short_of_the_wall() {
    let params = SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0);
    let traj = simulate(&params).unwrap();

    let peak = traj.max_position().unwrap();
    let last = traj.final_position().unwrap();
    assert!(peak < 1.5, "peak {peak} should stay inside the wall");
    assert!((last - 1.0).abs() < 0.05, "final position {last}");
}

#[test]
fn slippery_heavy_cart_overshoots_more() {
    let twin = simulate(&SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0)).unwrap();
    let real = simulate(&SimulationParameters::new(2.5, 0.2, 15.0, 2.0, 1.0)).unwrap();

    let twin_peak = twin.max_position().unwrap();
    let real_peak = real.max_position().unwrap();
    assert!(
        real_peak > twin_peak + 0.1,
        "real {real_peak} vs twin {twin_peak}"
    );
    // The real cart reaches the wall
    assert!(real_peak > 1.5);
}

#[test]
fn typed_plant_feeds_simulation() {
    let plant = CartPlant::from_quantities(kg(2.5), kgps(0.2)).unwrap();
    let from_plant = simulate(&SimulationParameters::for_plant(plant, 15.0, 2.0, 1.0)).unwrap();
    let from_raw = simulate(&SimulationParameters::new(2.5, 0.2, 15.0, 2.0, 1.0)).unwrap();
    assert_eq!(from_plant, from_raw);
}

#[test]
fn starting_on_target_stays_there() {
    let params = SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0).with_initial(1.0, 0.0);
    let traj = simulate(&params).unwrap();
    assert!(traj.x.iter().all(|&x| x == 1.0));
    assert!(traj.u.iter().all(|&u| u == 0.0));
}

#[test]
fn explicit_euler_instability_is_preserved() {
    // c·dt/m = 3 puts the velocity update outside Euler's stability region
    let params = SimulationParameters::new(1.0, 300.0, 0.0, 0.0, 0.0).with_initial(0.0, 1.0);
    let traj = simulate(&params).expect("instability is not an error");

    assert_eq!(traj.v[1], -2.0);
    assert_eq!(traj.v[2], 4.0);
    let last = traj.v.last().unwrap().abs();
    assert!(last > 1e100, "velocity should grow, got {last}");
}

#[test]
fn rk4_tracks_euler_without_matching_it() {
    let params = SimulationParameters::new(2.0, 1.0, 15.0, 2.0, 1.0);
    let euler = simulate_with(&params, IntegratorType::ForwardEuler).unwrap();
    let rk4 = simulate_with(&params, IntegratorType::RK4).unwrap();

    assert_eq!(euler.t, rk4.t);
    assert_ne!(euler.x, rk4.x);
    let gap = (euler.max_position().unwrap() - rk4.max_position().unwrap()).abs();
    assert!(gap < 0.05, "integrators disagree by {gap}");
    assert_eq!(*rk4.u.last().unwrap(), 0.0);
    assert_eq!(rk4.energy[0], 0.0);
}
