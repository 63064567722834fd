#[macro_use]
extern crate log;

use std::{error::Error, time::Instant};

use dense_matrix::Matrix;
use dialoguer::{theme::ColorfulTheme, Select};
use lin_reg::{FeatureMap, Model, TikhonovRegularization, DEFAULT_REGULARIZATION_COEFF};

/// RGB intensities recorded during calibration, paired with the motor angle held at the time
const CALIBRATION: [([f64; 3], f64); 21] = [
    ([298.0, 88.0, 113.0], 178.0),
    ([501.0, 147.0, 186.0], 178.0),
    ([387.0, 109.0, 142.0], 178.0),
    ([276.0, 86.0, 111.0], 178.0),
    ([445.0, 133.0, 172.0], 178.0),
    ([584.0, 173.0, 223.0], 178.0),
    ([571.0, 190.0, 237.0], 178.0),
    ([579.0, 240.0, 282.0], 178.0),
    ([411.0, 118.0, 155.0], 178.0),
    ([96.0, 172.0, 142.0], 353.0),
    ([67.0, 174.0, 129.0], 353.0),
    ([59.0, 149.0, 111.0], 353.0),
    ([73.0, 140.0, 111.0], 353.0),
    ([100.0, 259.0, 187.0], 353.0),
    ([111.0, 230.0, 178.0], 353.0),
    ([146.0, 265.0, 216.0], 353.0),
    ([241.0, 347.0, 301.0], 353.0),
    ([54.0, 146.0, 104.0], 353.0),
    ([99.0, 216.0, 166.0], 353.0),
    ([187.0, 282.0, 241.0], 353.0),
    ([34.0, 66.0, 54.0], 353.0),
];

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let mut xs = Matrix::new();
    let mut ys = Matrix::new();
    for (sample, angle) in CALIBRATION.iter() {
        xs.add_row(sample)?;
        ys.add_row(&[*angle])?;
    }
    info!("collected {} calibration samples", xs.rows());

    let maps = [
        FeatureMap::Bias,
        FeatureMap::Polynomial(2),
        FeatureMap::Polynomial(3),
        FeatureMap::Polynomial(4),
    ];
    let names = ["linear", "polynomial(2)", "polynomial(3)", "polynomial(4)"];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select regression")
        .items(&names)
        .default(0)
        .interact()?;

    let regressor = TikhonovRegularization {
        regularization_coeff: DEFAULT_REGULARIZATION_COEFF,
    };
    let t0 = Instant::now();
    let model = regressor.fit(&xs, &ys, maps[e])?;
    info!("{} regression done in {}us", names[e], t0.elapsed().as_micros());
    println!("weights: {}", model.weights());

    run_control_cycles(&model)?;

    Ok(())
}

/// Feeds every recorded sample through the model once, as the control loop would
fn run_control_cycles(model: &Model) -> Result<(), Box<dyn Error>> {
    for (sample, angle) in CALIBRATION.iter() {
        let target = model.predict_scalar(sample)?;
        println!(
            "{:?} -> target angle {} (recorded {})",
            sample,
            wrap_angle(target),
            angle
        );
    }
    Ok(())
}

/// Motor positions are whole degrees in [0, 360)
fn wrap_angle(target: f64) -> i64 {
    (target.trunc() as i64).rem_euclid(360)
}
