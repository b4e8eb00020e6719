//! Tests for error handling

use typeprobe_core::error::{Result, TypeProbeError};
use typeprobe_core::Address;

#[test]
fn test_address_not_mapped_display()
{
    let error = TypeProbeError::AddressNotMapped(Address::new(0x4d_2f80));
    let message = format!("{}", error);
    assert!(message.contains("0x00000000004d2f80"));
    assert!(message.contains("No section"));
}

#[test]
fn test_section_not_found_display()
{
    let error = TypeProbeError::SectionNotFound(".rodata".to_string());
    let message = format!("{}", error);
    assert!(message.contains("Section not found"));
    assert!(message.contains(".rodata"));
}

#[test]
fn test_truncated_read_display()
{
    let error = TypeProbeError::TruncatedRead {
        address: Address::new(0x1028),
        width: 4,
        section: ".rodata".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("4 bytes"));
    assert!(message.contains("0x0000000000001028"));
    assert!(message.contains(".rodata"));
}

#[test]
fn test_invalid_image_display()
{
    let error = TypeProbeError::InvalidImage("expected a 64-bit ELF image".to_string());
    let message = format!("{}", error);
    assert!(message.contains("Invalid image"));
    assert!(message.contains("64-bit"));
}

#[test]
fn test_io_error_conversion()
{
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let error: TypeProbeError = io.into();

    match error {
        TypeProbeError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_result_type()
{
    // Test that Result type is properly aliased
    let _result: Result<()> = Ok(());
    let _error_result: Result<()> = Err(TypeProbeError::VarintOverflow(Address::ZERO));
}
