use criterion::*;
use esis::{
    units::{Angle, AngleExt, Length, LengthExt},
    Builder, CylindricalPose, FromBuilder, Grating, Optic, PrimaryMirror, PrimaryMirrorGeometry,
};

const N_SAMPLE: usize = 10_000;

pub fn primary_radii(c: &mut Criterion) {
    let widths: Vec<_> = (0..N_SAMPLE)
        .map(|i| Length::from_millimeters(100. + 1e-5 * i as f64))
        .collect();
    let primary = PrimaryMirror::builder()
        .width_clear(widths)
        .width_border(Length::from_millimeters(5.))
        .build()
        .unwrap();
    c.bench_function("primary mirror radii", |b| {
        b.iter(|| {
            black_box(primary.radius_clear().unwrap());
            black_box(primary.radius_mechanical().unwrap());
        })
    });
}

pub fn grating_poses(c: &mut Criterion) {
    let azimuths: Vec<_> = (0..N_SAMPLE)
        .map(|i| Angle::from_degrees(360. * i as f64 / N_SAMPLE as f64))
        .collect();
    let grating = Grating::builder()
        .pose(
            CylindricalPose::default()
                .distance_radial(Length::from_millimeters(50.))
                .azimuth(azimuths),
        )
        .build()
        .unwrap();
    c.bench_function("grating pose isometries", |b| {
        b.iter(|| black_box(grating.transformation().isometry().unwrap()))
    });
}

criterion_group!(benches, primary_radii, grating_poses);
criterion_main!(benches);
