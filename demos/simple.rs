use dcm_ahrs::Dcm;
use nalgebra::Vector3;

const SAMPLE_PERIOD: f32 = 0.02; // 20 ms sample period

fn main() {
    let mut dcm = Dcm::new();

    // seed roll and pitch from gravity before the first update
    dcm.full_reset(&Vector3::new(0.0, 0.0, 1.0));

    for _ in 0..10 {
        // this loop should repeat each time new gyroscope data is available
        let gyroscope = Vector3::new(0.0, 0.0, 0.0); // replace this with actual gyroscope data in rad/s
        let accelerometer = Vector3::new(0.0, 0.0, 1.0); // replace this with actual accelerometer data in g

        let angles = dcm.update(gyroscope, accelerometer, SAMPLE_PERIOD).to_degrees();

        println!(
            "Roll: {:.2}, Pitch: {:.2}, Yaw: {:.2}",
            angles.roll, angles.pitch, angles.yaw
        );
    }
}
