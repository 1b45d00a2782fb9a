//! Algebraic form input consumed by the compiler.
//!
//! A form arrives here already multiplied out: a [`FormExpr`] is either a
//! single [`Term`] or a sum of sub-expressions, and each term is a constant
//! times a product of basis function factors against a measure. These types
//! carry no algebra of their own; simplification is the job of the front end
//! that produces them.

use itertools::Itertools;
use num::One;
use std::fmt;

use crate::traits::Element;
use crate::types::Index;

/// The measure a term is integrated against.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Integral {
    /// Integral over the interior of the cell (`dx`).
    Cell,
    /// Integral over a facet on the exterior boundary (`ds`).
    ExteriorFacet,
    /// Integral over a facet shared by two cells (`dS`).
    InteriorFacet,
}

impl fmt::Display for Integral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integral::Cell => write!(f, "dx"),
            Integral::ExteriorFacet => write!(f, "ds"),
            Integral::InteriorFacet => write!(f, "dS"),
        }
    }
}

/// A spatial derivative applied to a basis function factor.
#[derive(Debug)]
pub struct Derivative<'a, E: Element> {
    /// Index selecting the coordinate direction.
    pub index: Index,
    /// Element whose reference cell the derivative is taken on.
    pub element: &'a E,
}

impl<E: Element> Clone for Derivative<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Element> Copy for Derivative<'_, E> {}

impl<E: Element> fmt::Display for Derivative<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(d/dx({}))", self.index)
    }
}

/// One basis function factor of a term.
#[derive(Debug)]
pub struct BasisFunction<'a, E: Element> {
    /// Index numbering the basis functions of the element.
    pub index: Index,
    /// Indices into the value components, one per value tensor axis.
    pub components: Vec<Index>,
    /// Spatial derivatives applied to the function.
    pub derivatives: Vec<Derivative<'a, E>>,
    /// The element the function belongs to.
    pub element: &'a E,
}

impl<'a, E: Element> BasisFunction<'a, E> {
    /// Every index referenced by this factor, starting with the basis index
    /// and followed by component and derivative indices in order.
    pub fn indices(&self) -> impl Iterator<Item = Index> + '_ {
        std::iter::once(self.index)
            .chain(self.components.iter().copied())
            .chain(self.derivatives.iter().map(|d| d.index))
    }
}

impl<E: Element> Clone for BasisFunction<'_, E> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            components: self.components.clone(),
            derivatives: self.derivatives.clone(),
            element: self.element,
        }
    }
}

impl<E: Element> fmt::Display for BasisFunction<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v({})", self.index)?;
        if !self.components.is_empty() {
            write!(
                f,
                "[{}]",
                self.components.iter().map(|c| c.to_string()).join(", ")
            )?;
        }
        for derivative in &self.derivatives {
            write!(f, "{}", derivative)?;
        }
        Ok(())
    }
}

/// One multiplied-out term of a form.
#[derive(Debug)]
pub struct Term<'a, E: Element> {
    /// Constant scalar coefficient of the term.
    pub numeric: E::T,
    /// The basis function factors, in product order.
    pub basis_functions: Vec<BasisFunction<'a, E>>,
    /// The measure the term is integrated against, if any.
    pub integral: Option<Integral>,
}

impl<E: Element> Clone for Term<'_, E> {
    fn clone(&self) -> Self {
        Self {
            numeric: self.numeric,
            basis_functions: self.basis_functions.clone(),
            integral: self.integral,
        }
    }
}

impl<E: Element> fmt::Display for Term<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.numeric != E::T::one() || self.basis_functions.is_empty() {
            parts.push(format!("{}", self.numeric));
        }
        for v in &self.basis_functions {
            parts.push(v.to_string());
        }
        if let Some(integral) = self.integral {
            parts.push(integral.to_string());
        }
        write!(f, "{}", parts.iter().join("*"))
    }
}

/// An algebraic expression handed over by the form processing front end.
#[derive(Debug)]
pub enum FormExpr<'a, E: Element> {
    /// A single multiplied-out term.
    Term(Term<'a, E>),
    /// A sum of sub-expressions.
    Sum(Vec<FormExpr<'a, E>>),
}

impl<'a, E: Element> FormExpr<'a, E> {
    /// Flatten the expression into its terms, in left-to-right order.
    pub fn terms(&self) -> Vec<&Term<'a, E>> {
        match self {
            FormExpr::Term(term) => vec![term],
            FormExpr::Sum(parts) => parts.iter().flat_map(|part| part.terms()).collect(),
        }
    }

    /// Short description of the shape of the expression, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            FormExpr::Term(_) => "a single term",
            FormExpr::Sum(_) => "a sum of terms",
        }
    }
}

impl<E: Element> Clone for FormExpr<'_, E> {
    fn clone(&self) -> Self {
        match self {
            FormExpr::Term(term) => FormExpr::Term(term.clone()),
            FormExpr::Sum(parts) => FormExpr::Sum(parts.clone()),
        }
    }
}

impl<E: Element> fmt::Display for FormExpr<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormExpr::Term(term) => write!(f, "{}", term),
            FormExpr::Sum(parts) => {
                write!(f, "{}", parts.iter().map(|p| p.to_string()).join(" + "))
            }
        }
    }
}
