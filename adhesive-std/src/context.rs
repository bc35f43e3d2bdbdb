//! The shared context of a publish operation.

/// Where a publish operation's context lives.
///
/// Producers normally lend their own object so they can read the accumulated
/// state afterwards. When no context is supplied, the publish owns a default
/// value instead.
#[derive(Debug)]
pub enum Scope<'c, C> {
    /// Context owned by the publish operation.
    Owned(C),
    /// Context lent by the producer.
    Borrowed(&'c mut C),
}

impl<C> Scope<'_, C> {
    /// Shared access to the context.
    pub fn get(&self) -> &C {
        match self {
            Scope::Owned(cx) => cx,
            Scope::Borrowed(cx) => cx,
        }
    }

    /// Mutable access to the context.
    pub fn get_mut(&mut self) -> &mut C {
        match self {
            Scope::Owned(cx) => cx,
            Scope::Borrowed(cx) => cx,
        }
    }

    /// The owned context, if the publish owned one.
    pub fn into_owned(self) -> Option<C> {
        match self {
            Scope::Owned(cx) => Some(cx),
            Scope::Borrowed(_) => None,
        }
    }
}

impl<C: Default> Default for Scope<'_, C> {
    fn default() -> Self {
        Scope::Owned(C::default())
    }
}

impl<'c, C> From<&'c mut C> for Scope<'c, C> {
    fn from(cx: &'c mut C) -> Self {
        Scope::Borrowed(cx)
    }
}
