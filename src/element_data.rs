//! Aggregated element metadata for a form

use log::debug;

use crate::dofmap::{ConsistencyError, DofMap, DofMapError};
use crate::traits::Element;

/// The elements a form is defined over, together with their dof maps and
/// the cell dimension they share.
///
/// Later compilation stages read everything element related from here
/// instead of interrogating the elements again.
#[derive(Debug)]
pub struct ElementData<'a, E: Element> {
    elements: &'a [E],
    dof_maps: Vec<DofMap<E::T>>,
    cell_dimension: usize,
}

impl<'a, E: Element> ElementData<'a, E> {
    /// Gather the metadata of the given elements.
    ///
    /// A dof map is derived for every element, and all elements must agree
    /// on the cell dimension. At least one element is required, since an
    /// empty list has no cell dimension at all.
    pub fn new(elements: &'a [E]) -> Result<Self, DofMapError> {
        debug!("gathering element data for {} elements", elements.len());

        let first = elements.first().ok_or(DofMapError::NoElements)?;
        let cell_dimension = first.cell_dimension();
        for element in elements {
            if element.cell_dimension() != cell_dimension {
                return Err(ConsistencyError::CellDimension {
                    expected: cell_dimension,
                    found: element.cell_dimension(),
                }
                .into());
            }
        }
        let dof_maps = elements
            .iter()
            .map(|element| DofMap::new(element))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            elements,
            dof_maps,
            cell_dimension,
        })
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// The elements, in argument order.
    pub fn elements(&self) -> &'a [E] {
        self.elements
    }

    /// The dof maps, one per element, in argument order.
    pub fn dof_maps(&self) -> &[DofMap<E::T>] {
        &self.dof_maps
    }

    /// The dof map of one element, or `None` if the index is out of range.
    pub fn dof_map(&self, index: usize) -> Option<&DofMap<E::T>> {
        self.dof_maps.get(index)
    }

    /// The cell dimension shared by every element.
    pub fn cell_dimension(&self) -> usize {
        self.cell_dimension
    }
}
