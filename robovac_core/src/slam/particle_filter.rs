//! Particle filter for Monte Carlo localization.

use super::occupancy_grid::OccupancyGrid;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct ParticleFilter {
    particles: Vec<Particle>,
    width: usize,
    height: usize,
}

impl ParticleFilter {
    pub fn new(num_particles: usize, width: usize, height: usize, rng: &mut ChaCha8Rng) -> Self {
        let x_dist = Uniform::new(0.0, width as f64);
        let y_dist = Uniform::new(0.0, height as f64);
        let theta_dist = Uniform::new(0.0, 2.0 * PI);
        let weight = 1.0 / num_particles as f64;

        let particles = (0..num_particles)
            .map(|_| Particle {
                x: x_dist.sample(rng),
                y: y_dist.sample(rng),
                theta: theta_dist.sample(rng),
                weight,
            })
            .collect();

        Self { particles, width, height }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Move every particle by (Δx, Δy, Δθ) plus Gaussian motion noise,
    /// then wrap θ mod 2π and clip position to the inclusive cell-index
    /// bounds [0, W-1]×[0, H-1] (matching the source's off-by-one exactly).
    pub fn predict(&mut self, delta_x: f64, delta_y: f64, delta_theta: f64, sigma: f64, rng: &mut ChaCha8Rng) {
        let translation_noise = Normal::new(0.0, sigma).unwrap();
        let rotation_noise = Normal::new(0.0, sigma * 0.1).unwrap();

        let max_x = (self.width.saturating_sub(1)) as f64;
        let max_y = (self.height.saturating_sub(1)) as f64;

        for p in &mut self.particles {
            p.x += delta_x + translation_noise.sample(rng);
            p.y += delta_y + translation_noise.sample(rng);
            p.theta += delta_theta + rotation_noise.sample(rng);

            p.theta = p.theta.rem_euclid(2.0 * PI);
            p.x = p.x.clamp(0.0, max_x);
            p.y = p.y.clamp(0.0, max_y);
        }
    }

    /// Weight each particle by the summed map likelihood of the raw
    /// observation coordinates. The observations are used directly as
    /// map coordinates without transforming through the particle's own
    /// pose — a known simplification preserved from the source system
    /// a "corrected" pose-relative transform is not implemented.
    pub fn update(&mut self, measurement: &[(i32, i32)], occupancy_grid: &OccupancyGrid) {
        if measurement.is_empty() {
            return;
        }

        for p in &mut self.particles {
            let mut likelihood = 0.0;
            for &(obs_x, obs_y) in measurement {
                likelihood += occupancy_grid.get_probability(obs_x, obs_y);
            }
            p.weight = likelihood + 1e-10;
        }

        let total: f64 = self.particles.iter().map(|p| p.weight).sum();
        if total > 0.0 {
            for p in &mut self.particles {
                p.weight /= total;
            }
        }
    }

    /// Low-variance (stochastic-universal) resampling; replaces the
    /// particle vector wholesale.
    pub fn resample(&mut self, rng: &mut ChaCha8Rng) {
        let n = self.particles.len();
        let stride = 1.0 / n as f64;
        let r: f64 = rng.gen_range(0.0..stride);
        let mut c = self.particles[0].weight;
        let mut i = 0usize;

        let jitter_pos = Normal::new(0.0, 0.1).unwrap();
        let jitter_theta = Normal::new(0.0, 0.01).unwrap();

        let mut new_particles = Vec::with_capacity(n);
        for m in 0..n {
            let u = r + m as f64 * stride;
            while u > c {
                i += 1;
                if i >= n {
                    i = 0;
                }
                c += self.particles[i].weight;
            }

            new_particles.push(Particle {
                x: self.particles[i].x + jitter_pos.sample(rng),
                y: self.particles[i].y + jitter_pos.sample(rng),
                theta: self.particles[i].theta + jitter_theta.sample(rng),
                weight: 1.0 / n as f64,
            });
        }

        self.particles = new_particles;
    }

    /// Weighted mean (x, y); θ via weighted circular mean.
    pub fn estimated_pose(&self) -> (f64, f64, f64) {
        let x: f64 = self.particles.iter().map(|p| p.x * p.weight).sum();
        let y: f64 = self.particles.iter().map(|p| p.y * p.weight).sum();

        let sin_sum: f64 = self.particles.iter().map(|p| p.theta.sin() * p.weight).sum();
        let cos_sum: f64 = self.particles.iter().map(|p| p.theta.cos() * p.weight).sum();
        let theta = sin_sum.atan2(cos_sum);

        (x, y, theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn initialization_weights_sum_to_one() {
        let pf = ParticleFilter::new(100, 50, 50, &mut rng());
        let sum: f64 = pf.particles().iter().map(|p| p.weight).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn predict_clips_to_inclusive_bounds() {
        let mut pf = ParticleFilter::new(10, 20, 20, &mut rng());
        let mut r = rng();
        for _ in 0..50 {
            pf.predict(100.0, 100.0, 0.0, 0.1, &mut r);
        }
        for p in pf.particles() {
            assert!(p.x <= 19.0);
            assert!(p.y <= 19.0);
        }
    }

    #[test]
    fn update_with_empty_measurement_is_unchanged() {
        let mut pf = ParticleFilter::new(10, 20, 20, &mut rng());
        let before: Vec<_> = pf.particles().to_vec();
        let grid = OccupancyGrid::new(20, 20);
        pf.update(&[], &grid);
        assert_eq!(pf.particles().to_vec(), before);
    }

    #[test]
    fn update_normalizes_weights_to_one() {
        let mut pf = ParticleFilter::new(20, 20, 20, &mut rng());
        let mut grid = OccupancyGrid::new(20, 20);
        grid.update_cell(5, 5, true);
        pf.update(&[(5, 5)], &grid);
        let sum: f64 = pf.particles().iter().map(|p| p.weight).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn resample_preserves_particle_count_and_resets_weights() {
        let mut pf = ParticleFilter::new(30, 20, 20, &mut rng());
        let mut r = rng();
        pf.resample(&mut r);
        assert_eq!(pf.num_particles(), 30);
        for p in pf.particles() {
            assert!((p.weight - 1.0 / 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn estimated_pose_is_weighted_mean() {
        let mut pf = ParticleFilter::new(1, 20, 20, &mut rng());
        // Single particle: weighted mean equals its own pose exactly.
        let only = pf.particles()[0];
        let (x, y, theta) = pf.estimated_pose();
        assert!((x - only.x * only.weight).abs() < 1e-9);
        assert!((y - only.y * only.weight).abs() < 1e-9);
        let _ = theta;
    }
}
