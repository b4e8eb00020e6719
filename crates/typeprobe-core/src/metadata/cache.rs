use std::collections::HashMap;

use crate::types::{Address, TypeDescriptor, TypeRef};

/// Decoded type descriptors keyed by the address they were read from.
///
/// Grows monotonically for the lifetime of its owner and is never evicted:
/// the image does not change under us and the address space is finite.
///
/// ## Thread Safety
///
/// The cache is not thread-safe. If you need concurrent access, wrap its owner
/// in a `Mutex`; inserts must stay serialized for cycle detection to work.
#[derive(Debug, Default)]
pub struct TypeCache
{
    entries: HashMap<Address, TypeDescriptor>,
}

impl TypeCache
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn get(&self, address: Address) -> Option<&TypeDescriptor>
    {
        self.entries.get(&address)
    }

    pub fn contains(&self, address: Address) -> bool
    {
        self.entries.contains_key(&address)
    }

    pub(crate) fn insert(&mut self, descriptor: TypeDescriptor)
    {
        self.entries.insert(descriptor.address, descriptor);
    }

    /// Record the resolved pointer-to-this of an already cached entry.
    pub(crate) fn link_self_type(&mut self, address: Address, target: TypeRef)
    {
        if let Some(entry) = self.entries.get_mut(&address) {
            entry.self_type = Some(target);
        }
    }

    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }
}
