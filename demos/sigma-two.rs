extern crate nalgebra as na;

use merwe::{unscented_transform, CholeskySqrt, MatrixSqrt, MerweParams, Moments, SigmaPointGenerator};
use na::{dmatrix, dvector, DMatrix, DVector};
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rand_xoshiro::Xoshiro256PlusPlus;

const DT: f64 = 0.1;
const STEPS: usize = 50;
// モンテカルロのサンプル数
const SAMPLES: usize = 20000;

// 状態遷移関数 (振り子)
fn fx(x: &DVector<f64>, u: &DVector<f64>) -> DVector<f64> {
    let mut x = x.clone();
    x[0] += x[1] * DT;
    x[1] += (-x[0].sin() + u[0] - u[1]) * DT;
    x
}

fn q() -> DMatrix<f64> {
    dmatrix![0.0025, 0.005; 0.005, 0.01]
}

// N(mean, P) からサンプルを生成
fn sample(
    rng: &mut Xoshiro256PlusPlus,
    m: &Moments,
    count: usize,
) -> merwe::Result<Vec<DVector<f64>>> {
    let l = CholeskySqrt.sqrt(&m.covariance)?;
    Ok((0..count)
        .map(|_| {
            let z: DVector<f64> = DVector::from_fn(m.dimension(), |_, _| StandardNormal.sample(&mut *rng));
            &m.mean + &l * z
        })
        .collect())
}

fn sample_mean(samples: &[DVector<f64>]) -> DVector<f64> {
    let sum = samples
        .iter()
        .fold(DVector::zeros(samples[0].len()), |acc, x| acc + x);
    sum / samples.len() as f64
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()?;

    let gen = SigmaPointGenerator::with_params(2, MerweParams::new(0.5, 2.0, 1.0))?;
    log::info!("wm: {}", gen.mean_weights().transpose());
    log::info!("wc: {}", gen.covariance_weights().transpose());

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let u = dvector![0.5, -0.5];
    let q = q();

    let mut est = Moments::new(dvector![0.5, 0.0], dmatrix![0.04, 0.0; 0.0, 0.01])?;
    let mut particles = sample(&mut rng, &est, SAMPLES)?;
    let q_moments = Moments::zero_mean(q.clone())?;

    // ログファイルの作成
    std::fs::create_dir_all("logs")?;
    let mut wtr = csv::Writer::from_path("logs/sigma-two.csv")?;
    wtr.write_record(["t", "ut_x0", "ut_x1", "mc_x0", "mc_x1", "ut_p00", "ut_p11"])?;

    for k in 0..STEPS {
        est = unscented_transform(&gen, &est, |x| fx(x, &u), Some(&q))?;

        let noise = sample(&mut rng, &q_moments, SAMPLES)?;
        particles = particles
            .iter()
            .zip(noise.iter())
            .map(|(x, w)| fx(x, &u) + w)
            .collect();
        let mc = sample_mean(&particles);

        let t = (k + 1) as f64 * DT;
        wtr.write_record(&[
            t.to_string(),
            est.mean[0].to_string(),
            est.mean[1].to_string(),
            mc[0].to_string(),
            mc[1].to_string(),
            est.covariance[(0, 0)].to_string(),
            est.covariance[(1, 1)].to_string(),
        ])?;

        log::info!(
            "t: {:4.1} ut: ({:7.3},{:7.3}) mc: ({:7.3},{:7.3}) std: {:.3}",
            t,
            est.mean[0],
            est.mean[1],
            mc[0],
            mc[1],
            est.std_dev().norm()
        );
    }
    wtr.flush()?;
    Ok(())
}
