use nalgebra as na;
use num_traits::Float;

use crate::error::Error;

/// Gaussian belief over the tracked object's center and velocity:
/// mean (x, y, vx, vy) and 4x4 covariance.
#[derive(Debug, Clone)]
pub struct TrackState<F>
where
    F: na::RealField + Float,
{
    pub mean: na::Vector4<F>,
    pub covariance: na::Matrix4<F>,
}

impl<F> TrackState<F>
where
    F: na::RealField + Float,
{
    /// Belief at sequence start: mean and covariance both zero.
    pub fn zero() -> Self {
        Self {
            mean: na::Vector4::zeros(),
            covariance: na::Matrix4::zeros(),
        }
    }

    #[inline]
    pub fn position(&self) -> na::Point2<F> {
        na::Point2::new(self.mean.x, self.mean.y)
    }

    #[inline]
    pub fn velocity(&self) -> na::Vector2<F> {
        na::Vector2::new(self.mean.z, self.mean.w)
    }
}

/// Constant-velocity Kalman filter. Position evolves by adding velocity each
/// step; the observation extracts (x, y) from the state. All four parameter
/// matrices are fixed for the whole run.
#[derive(Debug, Clone)]
pub struct KalmanFilter<F>
where
    F: na::RealField + Float,
{
    transition: na::Matrix4<F>,
    observation: na::Matrix2x4<F>,
    process_noise: na::Matrix4<F>,
    measurement_noise: na::Matrix2<F>,
}

impl<F> KalmanFilter<F>
where
    F: na::RealField + Float,
{
    /// `process_noise` scales Q = q * I4, `measurement_noise` scales
    /// R = r * I2. Both must be strictly positive to keep the innovation
    /// covariance invertible.
    pub fn new(process_noise: F, measurement_noise: F) -> Self {
        let mut transition = na::Matrix4::identity();
        transition[(0, 2)] = F::one();
        transition[(1, 3)] = F::one();

        let mut observation = na::Matrix2x4::zeros();
        observation[(0, 0)] = F::one();
        observation[(1, 1)] = F::one();

        Self {
            transition,
            observation,
            process_noise: na::Matrix4::identity() * process_noise,
            measurement_noise: na::Matrix2::identity() * measurement_noise,
        }
    }

    pub fn predict(&self, state: &TrackState<F>) -> TrackState<F> {
        TrackState {
            mean: self.transition * state.mean,
            covariance: self.transition * state.covariance * self.transition.transpose()
                + self.process_noise,
        }
    }

    pub fn correct(
        &self,
        predicted: &TrackState<F>,
        measurement: na::Vector2<F>,
    ) -> Result<TrackState<F>, Error> {
        let innovation_cov = self.observation * predicted.covariance * self.observation.transpose()
            + self.measurement_noise;
        let inverse = innovation_cov
            .try_inverse()
            .ok_or(Error::Numerical("singular innovation covariance"))?;

        let gain = predicted.covariance * self.observation.transpose() * inverse;
        let residual = measurement - self.observation * predicted.mean;

        Ok(TrackState {
            mean: predicted.mean + gain * residual,
            covariance: (na::Matrix4::identity() - gain * self.observation) * predicted.covariance,
        })
    }
}
