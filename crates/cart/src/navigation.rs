//! Screen navigation seam.
//!
//! The cart never renders screens itself; it asks a [`Navigator`] supplied by
//! the host to switch to one.

use core::fmt;

/// Screens the cart can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The full cart screen.
    Cart,
}

impl Route {
    /// Screen identifier understood by the host's router.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cart => "Cart",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-provided screen switcher.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_route_literal() {
        assert_eq!(Route::Cart.as_str(), "Cart");
        assert_eq!(Route::Cart.to_string(), "Cart");
    }
}
