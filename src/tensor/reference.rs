//! Reference tensor computation

use log::debug;
use ndarray::{ArrayD, IxDyn};
use num::Zero;
use rayon::prelude::*;
use std::fmt;

use crate::form::{BasisFunction, FormExpr, Integral, Term};
use crate::tensor::{MultiIndex, TensorError};
use crate::traits::{Element, Integrator};
use crate::types::IndexKind;

/// The geometry independent tensor of one term, precomputed once on the
/// reference cell.
///
/// The entry for primary tuple `i` and secondary tuple `a` is the constant
/// coefficient of the term times the sum of the integrator's values over
/// every auxiliary tuple `b`. The auxiliary sum is accumulated in
/// enumeration order, innermost, so repeated compilations of the same term
/// produce bit for bit identical entries.
pub struct ReferenceTensor<'a, E: Element> {
    i: MultiIndex,
    a: MultiIndex,
    b: MultiIndex,
    numeric: E::T,
    basis_functions: Vec<BasisFunction<'a, E>>,
    integral: Integral,
    values: ArrayD<E::T>,
}

impl<'a, E: Element> ReferenceTensor<'a, E> {
    /// Compute the reference tensor of a term.
    pub fn from_term<I: Integrator<E>>(
        term: &Term<'a, E>,
        integrator: &I,
    ) -> Result<Self, TensorError> {
        Self::from_term_with_progress(term, integrator, &mut |_done, _total| {})
    }

    /// Compute the reference tensor of a term, reporting progress after
    /// every evaluated integral.
    ///
    /// The callback receives the number of integrals evaluated so far and
    /// the total. It observes the computation but cannot abort it.
    pub fn from_term_with_progress<I: Integrator<E>>(
        term: &Term<'a, E>,
        integrator: &I,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<Self, TensorError> {
        let integral = term.integral.ok_or(TensorError::MissingIntegral)?;
        let basis_functions = term.basis_functions.clone();

        let i = MultiIndex::resolve(IndexKind::Primary, &basis_functions)?;
        let a = MultiIndex::resolve(IndexKind::Secondary, &basis_functions)?;
        let b = MultiIndex::resolve(IndexKind::Auxiliary, &basis_functions)?;

        let total = i.len() * a.len() * b.len();
        debug!("computing {} integrals for {}", total, term);

        let shape = i.dims().iter().chain(a.dims()).copied().collect::<Vec<_>>();
        let mut values = ArrayD::zeros(IxDyn(&shape));
        let mut entry = Vec::with_capacity(shape.len());
        let mut done = 0;
        for i_tuple in i.indices() {
            for a_tuple in a.indices() {
                let mut sum = E::T::zero();
                for b_tuple in b.indices() {
                    sum = sum + integrator.integrate(&basis_functions, i_tuple, a_tuple, b_tuple);
                    done += 1;
                    progress(done, total);
                }
                entry.clear();
                entry.extend_from_slice(i_tuple);
                entry.extend_from_slice(a_tuple);
                values[IxDyn(&entry)] = sum * term.numeric;
            }
        }
        debug!(
            "computed reference tensor of rank {} with dimensions {:?}",
            i.rank() + a.rank(),
            shape
        );

        Ok(Self {
            i,
            a,
            b,
            numeric: term.numeric,
            basis_functions,
            integral,
            values,
        })
    }

    /// Compute the reference tensor of an expression that must already be a
    /// single multiplied-out term.
    ///
    /// Sums are rejected; hand them to [`compile_form`] instead, which
    /// compiles one tensor per term.
    pub fn from_expr<I: Integrator<E>>(
        expr: &FormExpr<'a, E>,
        integrator: &I,
    ) -> Result<Self, TensorError> {
        match expr {
            FormExpr::Term(term) => Self::from_term(term, integrator),
            sum @ FormExpr::Sum(_) => Err(TensorError::NotATerm {
                found: sum.describe(),
            }),
        }
    }

    /// Entry for the given primary and secondary tuples, or `None` if either
    /// tuple has the wrong length or lies outside its dimensions.
    pub fn get(&self, i: &[usize], a: &[usize]) -> Option<E::T> {
        if i.len() != self.i.rank() || a.len() != self.a.rank() {
            return None;
        }
        let mut entry = Vec::with_capacity(i.len() + a.len());
        entry.extend_from_slice(i);
        entry.extend_from_slice(a);
        self.values.get(IxDyn(&entry)).copied()
    }

    /// Rank of the tensor, primary positions followed by secondary ones.
    pub fn rank(&self) -> usize {
        self.i.rank() + self.a.rank()
    }

    /// The primary multi-index.
    pub fn primary(&self) -> &MultiIndex {
        &self.i
    }

    /// The secondary multi-index.
    pub fn secondary(&self) -> &MultiIndex {
        &self.a
    }

    /// The auxiliary multi-index that was summed out.
    pub fn auxiliary(&self) -> &MultiIndex {
        &self.b
    }

    /// The constant coefficient applied to every entry.
    pub fn numeric(&self) -> E::T {
        self.numeric
    }

    /// The measure the term was integrated against.
    pub fn integral(&self) -> Integral {
        self.integral
    }

    /// The basis function factors the tensor was computed from.
    pub fn basis_functions(&self) -> &[BasisFunction<'a, E>] {
        &self.basis_functions
    }

    /// All entries, shaped with the primary dimensions first and the
    /// secondary dimensions after them.
    pub fn values(&self) -> &ArrayD<E::T> {
        &self.values
    }
}

impl<E: Element> fmt::Display for ReferenceTensor<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.basis_functions {
            write!(f, "{}*", v)?;
        }
        write!(f, "{}", self.integral)
    }
}

/// Compile the reference tensor of every term of a form, in parallel.
///
/// The result holds one entry per term, in the order the terms appear in
/// the expression. A term that fails to compile contributes its error in
/// place and does not stop the remaining terms from compiling.
pub fn compile_form<'a, E, I>(
    form: &FormExpr<'a, E>,
    integrator: &I,
) -> Vec<Result<ReferenceTensor<'a, E>, TensorError>>
where
    E: Element + Sync,
    I: Integrator<E> + Sync,
{
    let terms = form.terms();
    debug!("compiling form with {} terms", terms.len());
    terms
        .par_iter()
        .map(|term| ReferenceTensor::from_term(term, integrator))
        .collect()
}
