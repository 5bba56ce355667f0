//! External model seam.
//!
//! The engine writes evaluated values into anything implementing `RigModel`;
//! parameter storage, deformation and rendering live elsewhere. Hosts
//! resolve handles to dense indices once and the engine addresses storage by
//! index inside the per-frame loops.

use crate::ids::ParamId;

pub trait RigModel {
    /// Resolve a parameter handle to a dense index, if the model has that knob.
    fn parameter_index(&self, id: ParamId) -> Option<usize>;
    fn parameter_value(&self, index: usize) -> f32;
    fn set_parameter_value(&mut self, index: usize, value: f32);

    /// Resolve a part handle to a dense index.
    fn part_index(&self, id: ParamId) -> Option<usize>;
    fn part_opacity(&self, index: usize) -> f32;
    fn set_part_opacity(&mut self, index: usize, value: f32);

    /// Whole-model opacity, driven directly by the reserved `Opacity` curve.
    fn set_model_opacity(&mut self, value: f32);
}
