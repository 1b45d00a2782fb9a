//! Test dof map extraction through the element data pipeline

use approx::assert_relative_eq;
use formtensor::dofmap::{ConsistencyError, DofMap, DofMapError, ElementClass};
use formtensor::element_data::ElementData;
use formtensor::traits::{DualBasis, Element, ElementFamily};
use formtensor::types::{DofEntity, EntityDofs};

struct LagrangeElement {
    family: ElementFamily,
    cell_dim: usize,
    space_dim: usize,
    value_dims: Vec<usize>,
    entity_dofs: Vec<EntityDofs>,
    subs: Vec<LagrangeElement>,
    dual: Option<DualBasis<f64>>,
}

impl Element for LagrangeElement {
    type T = f64;
    fn cell_dimension(&self) -> usize {
        self.cell_dim
    }
    fn space_dimension(&self) -> usize {
        self.space_dim
    }
    fn value_dimension(&self, axis: usize) -> usize {
        self.value_dims[axis]
    }
    fn family(&self) -> ElementFamily {
        self.family
    }
    fn signature(&self) -> String {
        format!(
            "Lagrange interval element with {} dofs",
            self.space_dim
        )
    }
    fn num_sub_elements(&self) -> usize {
        if self.subs.is_empty() {
            1
        } else {
            self.subs.len()
        }
    }
    fn sub_element(&self, index: usize) -> &Self {
        if self.subs.is_empty() {
            self
        } else {
            &self.subs[index]
        }
    }
    fn entity_dofs(&self) -> &[EntityDofs] {
        &self.entity_dofs
    }
    fn dual_basis(&self) -> Option<&DualBasis<f64>> {
        self.dual.as_ref()
    }
}

/// Lagrange element on the interval with equispaced nodal points: one dof
/// per vertex, the rest on the cell.
fn interval(degree: usize) -> LagrangeElement {
    let points = (0..=degree)
        .map(|k| vec![-1.0 + 2.0 * k as f64 / degree as f64])
        .collect();
    let interior = (1..degree).collect::<Vec<_>>();
    LagrangeElement {
        family: ElementFamily::Lagrange,
        cell_dim: 1,
        space_dim: degree + 1,
        value_dims: vec![],
        entity_dofs: vec![vec![vec![vec![0], vec![degree]], vec![interior]]],
        subs: vec![],
        dual: Some(DualBasis { points }),
    }
}

/// Vector valued linear Lagrange element on the interval, one scalar
/// sub-element per component.
fn vector_interval(components: usize) -> LagrangeElement {
    let entity_dofs = (0..components)
        .map(|_| interval(1).entity_dofs[0].clone())
        .collect();
    LagrangeElement {
        family: ElementFamily::Mixed,
        cell_dim: 1,
        space_dim: 2 * components,
        value_dims: vec![components],
        entity_dofs,
        subs: (0..components).map(|_| interval(1)).collect(),
        dual: None,
    }
}

#[test]
fn test_scalar_quadratic_dof_map() {
    let element = interval(2);
    let map = DofMap::new(&element).unwrap();
    assert_eq!(
        map.signature(),
        "dof map for Lagrange interval element with 3 dofs"
    );
    assert_eq!(map.local_dimension(), 3);
    assert_eq!(map.num_dofs_per_dim(), &[1, 1]);
    // The midpoint dof 1 sits on the cell, dof 2 on the second vertex.
    assert_eq!(
        map.dof_entities(),
        &[
            DofEntity { dim: 0, entity: 0 },
            DofEntity { dim: 1, entity: 0 },
            DofEntity { dim: 0, entity: 1 },
        ]
    );
    assert_eq!(ElementClass::classify(&element), ElementClass::ScalarLagrange);
    assert!(map.has_dof_coordinates());
    let coordinates = map.dof_coordinates().unwrap();
    let expected = [0.0, 0.5, 1.0];
    for (point, x) in coordinates.iter().zip(expected) {
        assert_relative_eq!(point[0], x);
    }
    assert_eq!(map.dof_components(), Some(&[0, 0, 0][..]));
}

#[test]
fn test_vector_element_dof_map() {
    let element = vector_interval(3);
    assert_eq!(
        ElementClass::classify(&element),
        ElementClass::VectorLagrange { components: 3 }
    );
    let map = DofMap::new(&element).unwrap();
    assert_eq!(map.local_dimension(), 6);
    assert_eq!(map.num_dofs_per_dim(), &[3, 0]);
    for sub in 0..3 {
        assert_eq!(map.sub_num_dofs_per_dim(sub), Some(&[1, 0][..]));
    }
    // Each component contributes its own copy of the scalar layout.
    assert_eq!(map.dof_entities().len(), 6);
    for component in 0..3 {
        assert_eq!(
            map.dof_entities()[2 * component],
            DofEntity { dim: 0, entity: 0 }
        );
        assert_eq!(
            map.dof_entities()[2 * component + 1],
            DofEntity { dim: 0, entity: 1 }
        );
    }
    let coordinates = map.dof_coordinates().unwrap();
    assert_eq!(coordinates.len(), 6);
    for component in 0..3 {
        assert_relative_eq!(coordinates[2 * component][0], 0.0);
        assert_relative_eq!(coordinates[2 * component + 1][0], 1.0);
    }
    assert_eq!(map.dof_components(), Some(&[0, 0, 1, 1, 2, 2][..]));
}

#[test]
fn test_mixed_order_pair_shares_a_cell() {
    // A Taylor-Hood style pairing of quadratic and linear elements.
    let elements = vec![interval(2), interval(1)];
    let data = ElementData::new(&elements).unwrap();
    assert_eq!(data.num_elements(), 2);
    assert_eq!(data.cell_dimension(), 1);
    assert_eq!(data.dof_map(0).unwrap().local_dimension(), 3);
    assert_eq!(data.dof_map(1).unwrap().local_dimension(), 2);
}

#[test]
fn test_elements_on_different_cells_are_rejected() {
    let mut triangle = interval(1);
    triangle.cell_dim = 2;
    let elements = vec![interval(1), triangle];
    assert!(matches!(
        ElementData::new(&elements),
        Err(DofMapError::Consistency(ConsistencyError::CellDimension {
            expected: 1,
            found: 2,
        }))
    ));
}
