use super::{Fragment, MassConfig, MassMode};
use crate::math::Real;

/// Distributes a total mass among fragments.
///
/// This is a cheap heuristic: in [`MassMode::Volume`], the volume of a fragment is approximated
/// by the volume of its world-space AABB.
#[derive(Clone, Debug, PartialEq)]
pub struct MassAssigner {
    /// How the mass is distributed.
    pub mode: MassMode,
    /// The mass to distribute.
    pub total: Real,
    /// The fragment property the mass is written to.
    pub property_name: String,
}

impl MassAssigner {
    /// Creates a new mass assigner writing to the `"mass"` property.
    pub fn new(mode: MassMode, total: Real) -> Self {
        Self {
            mode,
            total,
            property_name: "mass".to_string(),
        }
    }

    /// The mass assigner described by `config`, or `None` if mass assignment is disabled.
    pub fn from_config(config: &MassConfig) -> Option<Self> {
        config.enabled.then(|| Self {
            mode: config.mode,
            total: config.total,
            property_name: config.property_name.clone(),
        })
    }

    /// Sets the mass property of every fragment.
    ///
    /// In [`MassMode::Volume`], nothing is assigned if the fragments have a zero total volume.
    pub fn assign(&self, fragments: &mut [Fragment]) {
        match self.mode {
            MassMode::Uniform => {
                for fragment in fragments {
                    self.set_mass(fragment, self.total);
                }
            }
            MassMode::Volume => {
                let volumes: Vec<Real> = fragments
                    .iter()
                    .map(|f| f.world_aabb().volume())
                    .collect();
                let total_volume: Real = volumes.iter().sum();

                if total_volume > 0.0 {
                    let factor = self.total / total_volume;
                    for (fragment, volume) in fragments.iter_mut().zip(volumes) {
                        self.set_mass(fragment, volume * factor);
                    }
                } else {
                    log::debug!("The fragments have no volume, skipping the mass assignment.");
                }
            }
        }
    }

    fn set_mass(&self, fragment: &mut Fragment, mass: Real) {
        let _ = fragment.properties.insert(self.property_name.clone(), mass);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Isometry, Vector};
    use crate::shape::PolyMesh;

    fn fragment(half_extents: Vector<Real>) -> Fragment {
        Fragment::new(
            "Cube_cell".to_string(),
            PolyMesh::cuboid(half_extents),
            Isometry::translation(1.0, 2.0, 3.0),
            0,
        )
    }

    #[test]
    fn uniform_mass() {
        let mut fragments = vec![fragment(Vector::repeat(1.0)), fragment(Vector::repeat(2.0))];
        MassAssigner::new(MassMode::Uniform, 3.0).assign(&mut fragments);
        assert!(fragments.iter().all(|f| f.property("mass") == Some(3.0)));
    }

    #[test]
    fn volume_mass_is_proportional() {
        let mut fragments = vec![
            fragment(Vector::new(1.0, 1.0, 1.0)),
            fragment(Vector::new(1.0, 1.0, 3.0)),
        ];
        MassAssigner::new(MassMode::Volume, 2.0).assign(&mut fragments);
        assert_relative_eq!(fragments[0].property("mass").unwrap(), 0.5, epsilon = 1.0e-12);
        assert_relative_eq!(fragments[1].property("mass").unwrap(), 1.5, epsilon = 1.0e-12);
    }

    #[test]
    fn zero_volume_is_a_no_op() {
        let mut fragments = vec![fragment(Vector::new(1.0, 1.0, 0.0))];
        MassAssigner::new(MassMode::Volume, 2.0).assign(&mut fragments);
        assert!(fragments[0].properties.is_empty());
    }

    #[test]
    fn mass_is_written_to_the_configured_property() {
        let config = MassConfig {
            enabled: true,
            mode: MassMode::Uniform,
            total: 4.0,
            property_name: "weight".to_string(),
        };
        let mut fragments = vec![fragment(Vector::repeat(1.0))];
        MassAssigner::from_config(&config)
            .unwrap()
            .assign(&mut fragments);
        assert_eq!(fragments[0].property("weight"), Some(4.0));
        assert_eq!(fragments[0].property("mass"), None);
    }

    #[test]
    fn disabled_config_gives_no_assigner() {
        assert!(MassAssigner::from_config(&MassConfig::default()).is_none());
    }
}
