//! Interface descriptors and itab bindings.

use std::fmt;

use super::{Address, TypeDescriptor};

/// One entry of an interface's method set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMethod
{
    pub name: String,
    pub method_type: TypeDescriptor,
}

impl fmt::Display for InterfaceMethod
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "Method: {}", self.name)?;
        write!(f, "Type: {}", self.method_type)
    }
}

/// An interface type: its own descriptor, package path, and method set.
///
/// `methods` is in on-disk order, which is the order the runtime sorts them
/// in when building the interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor
{
    pub type_info: TypeDescriptor,
    pub package_path: String,
    pub methods: Vec<InterfaceMethod>,
}

impl InterfaceDescriptor
{
    /// Look a method up by name.
    pub fn method(&self, name: &str) -> Option<&InterfaceMethod>
    {
        self.methods.iter().find(|method| method.name == name)
    }
}

impl fmt::Display for InterfaceDescriptor
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "Type:\n{}", self.type_info)?;
        writeln!(f, "Interface package path: {}", self.package_path)?;
        write!(f, "Interface methods")?;
        for method in &self.methods {
            write!(f, "\n{method}")?;
        }
        Ok(())
    }
}

/// An observed binding of an interface to a concrete type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItabRecord
{
    pub source_address: Address,
    pub interface: InterfaceDescriptor,
    pub concrete_type: TypeDescriptor,
}

impl fmt::Display for ItabRecord
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "Itab at {}", self.source_address)?;
        writeln!(f, "Interface:\n{}", self.interface)?;
        write!(f, "\nType:\n{}", self.concrete_type)
    }
}
