//! Synthetic tilt trace
//!
//! Drives the filter through a scripted sequence of tilts and a slow yaw
//! turn, with noisy and slightly biased gyroscope readings plus a burst of
//! lateral acceleration. Every cycle is written to `dcm_trace.csv` and the
//! estimated angles, trust weight and integral feedback are plotted to
//! `dcm_trace.png` next to the true attitude.
//!
//! Run with: `cargo run --example trace`

use dcm_ahrs::{Dcm, Matrix3Ext, rotation_from_euler};
use nalgebra::Vector3;
use plotters::prelude::*;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;
use serde::Serialize;
use std::error::Error;

const SAMPLE_PERIOD: f32 = 0.02; // 50 Hz
const DURATION: f32 = 120.0; // seconds
const GYRO_BIAS: [f32; 3] = [0.004, -0.003, 0.002]; // rad/s

#[derive(Debug, Serialize)]
struct TraceRecord {
    #[serde(rename = "Time (s)")]
    time: f32,
    #[serde(rename = "True roll (deg)")]
    true_roll: f32,
    #[serde(rename = "True pitch (deg)")]
    true_pitch: f32,
    #[serde(rename = "True yaw (deg)")]
    true_yaw: f32,
    #[serde(rename = "Roll (deg)")]
    roll: f32,
    #[serde(rename = "Pitch (deg)")]
    pitch: f32,
    #[serde(rename = "Yaw (deg)")]
    yaw: f32,
    #[serde(rename = "Accelerometer weight")]
    accelerometer_weight: f32,
    #[serde(rename = "Integral X (rad/s)")]
    integral_x: f32,
    #[serde(rename = "Integral Y (rad/s)")]
    integral_y: f32,
    #[serde(rename = "Orthonormality error")]
    orthonormality_error: f32,
}

/// Scripted attitude (yaw, pitch, roll) in radians
fn truth(time: f32) -> (f32, f32, f32) {
    let ramp = |from: f32, to: f32, value: f32| ((time - from) / (to - from)).clamp(0.0, 1.0) * value;

    let pitch = ramp(10.0, 15.0, 20f32.to_radians()) - ramp(40.0, 45.0, 20f32.to_radians());
    let roll = ramp(20.0, 25.0, -30f32.to_radians()) - ramp(50.0, 55.0, -30f32.to_radians());
    let yaw = ramp(70.0, 100.0, 90f32.to_radians());
    (yaw, pitch, roll)
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("DCM trace - synthetic tilts with noisy, biased gyroscope");

    let mut rng = Pcg64::seed_from_u64(2024);
    let bias = Vector3::from(GYRO_BIAS);
    let gyro_noise = Normal::new(0.0f32, 0.01)?;
    let accel_noise = Normal::new(0.0f32, 0.005)?;
    let steps = (DURATION / SAMPLE_PERIOD) as usize;

    let mut dcm = Dcm::new();
    dcm.full_reset(&Vector3::new(0.0, 0.0, 1.0));

    let mut writer = csv::Writer::from_path("dcm_trace.csv")?;
    let mut records = Vec::with_capacity(steps);
    let mut previous = rotation_from_euler(0.0, 0.0, 0.0);

    for step in 1..=steps {
        let time = step as f32 * SAMPLE_PERIOD;
        let (yaw, pitch, roll) = truth(time);
        let current = rotation_from_euler(yaw, pitch, roll);

        // Body rate that carries the previous attitude into the current one
        let delta = previous.transpose() * current;
        let rate = Vector3::new(
            delta[(2, 1)] - delta[(1, 2)],
            delta[(0, 2)] - delta[(2, 0)],
            delta[(1, 0)] - delta[(0, 1)],
        ) / (2.0 * SAMPLE_PERIOD);
        previous = current;

        let noise = Vector3::from_fn(|_, _| gyro_noise.sample(&mut rng));
        let gyroscope = rate + bias + noise;

        // Gravity in the body frame, with a lateral shove between 30 and 33 s
        let mut accelerometer =
            current.row_vector(2) + Vector3::from_fn(|_, _| accel_noise.sample(&mut rng));
        if (30.0..33.0).contains(&time) {
            accelerometer.x += 0.8;
        }

        let angles = dcm.update(gyroscope, accelerometer, SAMPLE_PERIOD).to_degrees();
        let states = dcm.internal_states();

        let record = TraceRecord {
            time,
            true_roll: roll.to_degrees(),
            true_pitch: pitch.to_degrees(),
            true_yaw: yaw.to_degrees(),
            roll: angles.roll,
            pitch: angles.pitch,
            yaw: angles.yaw,
            accelerometer_weight: states.accelerometer_weight,
            integral_x: states.integral_feedback.x,
            integral_y: states.integral_feedback.y,
            orthonormality_error: dcm.rotation_matrix().orthonormality_error(),
        };
        writer.serialize(&record)?;
        records.push(record);
    }
    writer.flush()?;

    if let Some(last) = records.last() {
        println!(
            "Final: roll {:.2} ({:.2}), pitch {:.2} ({:.2}), yaw {:.2} ({:.2})",
            last.roll, last.true_roll, last.pitch, last.true_pitch, last.yaw, last.true_yaw
        );
        println!(
            "Integral feedback {:.4}, {:.4} against bias {:.4}, {:.4}",
            last.integral_x, last.integral_y, -GYRO_BIAS[0], -GYRO_BIAS[1]
        );
    }

    plot(&records)?;
    println!("Wrote dcm_trace.csv and dcm_trace.png");

    Ok(())
}

fn plot(records: &[TraceRecord]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new("dcm_trace.png", (1000, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let charts = root.split_evenly((3, 1));

    let end = records.last().map_or(DURATION, |r| r.time);

    let mut euler_chart = ChartBuilder::on(&charts[0])
        .caption("Euler angles", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..end, -45f32..100f32)?;
    euler_chart.configure_mesh().y_desc("Degrees").draw()?;

    let series: [(&str, RGBColor, fn(&TraceRecord) -> (f32, f32)); 3] = [
        ("Roll", RED, |r| (r.roll, r.true_roll)),
        ("Pitch", GREEN, |r| (r.pitch, r.true_pitch)),
        ("Yaw", BLUE, |r| (r.yaw, r.true_yaw)),
    ];
    for (label, color, value) in series {
        euler_chart
            .draw_series(LineSeries::new(
                records.iter().map(|r| (r.time, value(r).0)),
                &color,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        euler_chart.draw_series(LineSeries::new(
            records.iter().map(|r| (r.time, value(r).1)),
            color.mix(0.3),
        ))?;
    }
    euler_chart.configure_series_labels().draw()?;

    let mut weight_chart = ChartBuilder::on(&charts[1])
        .caption("Accelerometer weight", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..end, -0.05f32..1.05f32)?;
    weight_chart.configure_mesh().draw()?;
    weight_chart.draw_series(LineSeries::new(
        records.iter().map(|r| (r.time, r.accelerometer_weight)),
        &BLACK,
    ))?;

    let mut integral_chart = ChartBuilder::on(&charts[2])
        .caption("Integral feedback", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..end, -0.01f32..0.01f32)?;
    integral_chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("rad/s")
        .draw()?;
    integral_chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.time, r.integral_x)),
            &RED,
        ))?
        .label("X")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    integral_chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.time, r.integral_y)),
            &GREEN,
        ))?
        .label("Y")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
    integral_chart.configure_series_labels().draw()?;

    root.present()?;
    Ok(())
}
