//! Dof maps extracted from finite element descriptions
//!
//! A [`DofMap`] is a structural view of one element: how many dofs the local
//! space has, which reference cell entity each dof sits on, and, for nodal
//! elements, where each dof lives on the cell and which value component it
//! carries. Everything is derived once, validated, and then immutable.

use log::debug;
use num::{NumCast, One};

use crate::traits::{Element, ElementFamily};
use crate::types::{DofEntity, EntityDofs, RealScalar};

/// An error produced while deriving a dof map.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DofMapError {
    /// The element reports no entity dof tables at all.
    #[error("element reports no entity dofs")]
    EmptyEntityDofs,
    /// A local dof is listed on no entity.
    #[error("local dof {dof} is not attached to any entity")]
    UnattachedDof {
        /// The unattached local dof.
        dof: usize,
    },
    /// A nodal element supplies no dual basis points.
    #[error("element {signature} has no dual basis")]
    MissingDualBasis {
        /// Signature of the offending element.
        signature: String,
    },
    /// No elements were supplied.
    #[error("at least one element is required")]
    NoElements,
    /// Parts of the description that must agree do not.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// A disagreement between values that must match across an element
/// description.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    /// Entities of one dimension report different numbers of dofs.
    #[error("entities of dimension {dim} carry {found} dofs where {expected} were expected")]
    EntityDofCount {
        /// Topological dimension of the entities.
        dim: usize,
        /// Dof count reported by the first entity of the dimension.
        expected: usize,
        /// Conflicting dof count.
        found: usize,
    },
    /// Elements of one form disagree on the cell dimension.
    #[error("element has cell dimension {found} but {expected} was expected")]
    CellDimension {
        /// Cell dimension of the first element.
        expected: usize,
        /// Conflicting cell dimension.
        found: usize,
    },
    /// An entity dof table references a dof outside the local space.
    #[error("dof {dof} lies outside the local space of dimension {local_dimension}")]
    DofRange {
        /// The out of range dof.
        dof: usize,
        /// Dimension of the local space.
        local_dimension: usize,
    },
}

/// The shape of an element, as far as dof coordinates are concerned.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ElementClass {
    /// A scalar nodal Lagrange element.
    ScalarLagrange,
    /// A direct sum of identical scalar Lagrange elements, one per value
    /// component.
    VectorLagrange {
        /// Number of value components.
        components: usize,
    },
    /// Any other element.
    Other,
}

impl ElementClass {
    /// Classify an element description.
    ///
    /// A vector valued element is recognised structurally, as a direct sum
    /// whose sub-elements all share one family and one space dimension.
    pub fn classify<E: Element>(element: &E) -> Self {
        match element.family() {
            ElementFamily::Lagrange => ElementClass::ScalarLagrange,
            ElementFamily::Mixed if uniform_sum(element) => ElementClass::VectorLagrange {
                components: element.value_dimension(0),
            },
            _ => ElementClass::Other,
        }
    }

    /// Whether dof coordinates and components can be derived for elements
    /// of this class.
    pub fn has_dof_coordinates(&self) -> bool {
        !matches!(self, ElementClass::Other)
    }
}

fn uniform_sum<E: Element>(element: &E) -> bool {
    let first = element.sub_element(0);
    (1..element.num_sub_elements()).all(|k| {
        let sub = element.sub_element(k);
        sub.family() == first.family() && sub.space_dimension() == first.space_dimension()
    })
}

/// Structural dof metadata of one finite element.
#[derive(Debug)]
pub struct DofMap<T: RealScalar> {
    signature: String,
    local_dimension: usize,
    entity_dofs: Vec<EntityDofs>,
    num_dofs_per_dim: Vec<Vec<usize>>,
    combined_num_dofs_per_dim: Vec<usize>,
    dof_entities: Vec<DofEntity>,
    dof_coordinates: Option<Vec<Vec<T>>>,
    dof_components: Option<Vec<usize>>,
}

impl<T: RealScalar> DofMap<T> {
    /// Derive the dof map of an element.
    ///
    /// The element's entity dof tables are validated while the map is
    /// built; a malformed description is rejected rather than silently
    /// repaired.
    pub fn new<E: Element<T = T>>(element: &E) -> Result<Self, DofMapError> {
        debug!("building dof map for {}", element.signature());

        let entity_dofs = element.entity_dofs();
        if entity_dofs.is_empty() {
            return Err(DofMapError::EmptyEntityDofs);
        }
        let local_dimension = element.space_dimension();
        let num_dofs_per_dim = count_dofs_per_dim(entity_dofs)?;
        let combined_num_dofs_per_dim = combine_dof_counts(&num_dofs_per_dim);
        let dof_entities = attach_dofs(entity_dofs, local_dimension)?;

        let class = ElementClass::classify(element);
        let dof_coordinates = nodal_coordinates(element, class)?;
        let dof_components = component_labels(element, class);

        Ok(Self {
            signature: format!("dof map for {}", element.signature()),
            local_dimension,
            entity_dofs: entity_dofs.to_vec(),
            num_dofs_per_dim,
            combined_num_dofs_per_dim,
            dof_entities,
            dof_coordinates,
            dof_components,
        })
    }

    /// String identifying the dof map, used in diagnostics.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Dimension of the local function space.
    pub fn local_dimension(&self) -> usize {
        self.local_dimension
    }

    /// The entity dof tables the map was built from, one per sub-element.
    pub fn entity_dofs(&self) -> &[EntityDofs] {
        &self.entity_dofs
    }

    /// Number of dofs on each entity of each dimension, summed over the
    /// sub-elements.
    pub fn num_dofs_per_dim(&self) -> &[usize] {
        &self.combined_num_dofs_per_dim
    }

    /// Number of dofs on each entity of each dimension for one
    /// sub-element, or `None` if the sub-element does not exist.
    pub fn sub_num_dofs_per_dim(&self, sub: usize) -> Option<&[usize]> {
        self.num_dofs_per_dim.get(sub).map(Vec::as_slice)
    }

    /// The entity each local dof is attached to, in dof order.
    pub fn dof_entities(&self) -> &[DofEntity] {
        &self.dof_entities
    }

    /// Whether nodal coordinates and component labels are available.
    pub fn has_dof_coordinates(&self) -> bool {
        self.dof_coordinates.is_some()
    }

    /// Coordinates of each dof on the `[0, 1]` reference cell, in dof
    /// order, or `None` for elements without point evaluation dofs.
    pub fn dof_coordinates(&self) -> Option<&[Vec<T>]> {
        self.dof_coordinates.as_deref()
    }

    /// Value component carried by each dof, in dof order, or `None` for
    /// elements without point evaluation dofs.
    pub fn dof_components(&self) -> Option<&[usize]> {
        self.dof_components.as_deref()
    }
}

/// Count the dofs per entity for each dimension of each sub-element,
/// requiring all entities of one dimension to agree.
fn count_dofs_per_dim(entity_dofs: &[EntityDofs]) -> Result<Vec<Vec<usize>>, DofMapError> {
    let mut tables = Vec::with_capacity(entity_dofs.len());
    for sub in entity_dofs {
        let mut table = Vec::with_capacity(sub.len());
        for (dim, entities) in sub.iter().enumerate() {
            let expected = entities.first().map_or(0, Vec::len);
            for dofs in entities {
                if dofs.len() != expected {
                    return Err(ConsistencyError::EntityDofCount {
                        dim,
                        expected,
                        found: dofs.len(),
                    }
                    .into());
                }
            }
            table.push(expected);
        }
        tables.push(table);
    }
    Ok(tables)
}

/// Sum the per sub-element dof counts into one table covering every
/// dimension any sub-element mentions.
fn combine_dof_counts(tables: &[Vec<usize>]) -> Vec<usize> {
    let len = tables.iter().map(Vec::len).max().unwrap_or(0);
    let mut combined = vec![0; len];
    for table in tables {
        for (dim, count) in table.iter().enumerate() {
            combined[dim] += count;
        }
    }
    combined
}

/// Invert the entity dof tables into one entity per local dof.
///
/// Sub-element tables number their dofs from zero, so each table is shifted
/// by the number of dofs the preceding tables covered. Every local dof must
/// end up attached to exactly one entity.
fn attach_dofs(
    entity_dofs: &[EntityDofs],
    local_dimension: usize,
) -> Result<Vec<DofEntity>, DofMapError> {
    let mut attached: Vec<Option<DofEntity>> = vec![None; local_dimension];
    let mut offset = 0;
    for sub in entity_dofs {
        let mut sub_size = 0;
        for (dim, entities) in sub.iter().enumerate() {
            for (entity, dofs) in entities.iter().enumerate() {
                for &dof in dofs {
                    let global = offset + dof;
                    if global >= local_dimension {
                        return Err(ConsistencyError::DofRange {
                            dof: global,
                            local_dimension,
                        }
                        .into());
                    }
                    attached[global] = Some(DofEntity { dim, entity });
                    sub_size = sub_size.max(dof + 1);
                }
            }
        }
        offset += sub_size;
    }
    attached
        .into_iter()
        .enumerate()
        .map(|(dof, entity)| entity.ok_or(DofMapError::UnattachedDof { dof }))
        .collect()
}

/// Nodal coordinates per dof, remapped from the `[-1, 1]` convention of the
/// dual basis to the `[0, 1]` reference cell.
///
/// Vector valued elements repeat the scalar sub-element's points once per
/// component, in component order.
fn nodal_coordinates<E: Element>(
    element: &E,
    class: ElementClass,
) -> Result<Option<Vec<Vec<E::T>>>, DofMapError> {
    let repeats = match class {
        ElementClass::ScalarLagrange => 1,
        ElementClass::VectorLagrange { components } => components,
        ElementClass::Other => return Ok(None),
    };
    let sub = element.sub_element(0);
    let dual = sub
        .dual_basis()
        .ok_or_else(|| DofMapError::MissingDualBasis {
            signature: sub.signature(),
        })?;
    let half = <E::T as NumCast>::from(0.5).unwrap();
    let mut coordinates = Vec::with_capacity(repeats * dual.points.len());
    for _ in 0..repeats {
        for point in &dual.points {
            coordinates.push(point.iter().map(|x| half * (*x + E::T::one())).collect());
        }
    }
    Ok(Some(coordinates))
}

/// Value component per dof: all zero for a scalar element, one block per
/// component for a vector valued one.
fn component_labels<E: Element>(element: &E, class: ElementClass) -> Option<Vec<usize>> {
    match class {
        ElementClass::ScalarLagrange => Some(vec![0; element.space_dimension()]),
        ElementClass::VectorLagrange { components } => {
            let block = element.sub_element(0).space_dimension();
            let mut labels = Vec::with_capacity(components * block);
            for component in 0..components {
                labels.extend(std::iter::repeat(component).take(block));
            }
            Some(labels)
        }
        ElementClass::Other => None,
    }
}
