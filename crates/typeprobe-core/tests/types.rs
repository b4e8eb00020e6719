//! Tests for address parsing and the decoded record types

use typeprobe_core::types::{Address, TypeFlags, TypeRef};

#[test]
fn test_address_from_u64()
{
    let addr = Address::from(0x1000);
    assert_eq!(addr.value(), 0x1000);
    let raw: u64 = addr.into();
    assert_eq!(raw, 0x1000);
}

#[test]
fn test_address_display_is_zero_padded_hex()
{
    assert_eq!(Address::new(0x4d_2f80).to_string(), "0x00000000004d2f80");
    assert_eq!(format!("{:x}", Address::new(0xbeef)), "beef");
}

#[test]
fn test_address_parse_hex()
{
    assert_eq!("0x4d2f80".parse::<Address>().unwrap(), Address::new(0x4d_2f80));
    assert_eq!("0XFF".parse::<Address>().unwrap(), Address::new(0xff));
    assert_eq!(" 0x10 ".parse::<Address>().unwrap(), Address::new(0x10));
}

#[test]
fn test_address_parse_decimal()
{
    assert_eq!("4096".parse::<Address>().unwrap(), Address::new(4096));
    assert_eq!("0".parse::<Address>().unwrap(), Address::ZERO);
}

#[test]
fn test_address_parse_rejects_garbage()
{
    assert!("".parse::<Address>().is_err());
    assert!("0x".parse::<Address>().is_err());
    assert!("0xfoo".parse::<Address>().is_err());
    assert!("ff".parse::<Address>().is_err());
    assert!("18446744073709551616".parse::<Address>().is_err());

    let err = "0xzz".parse::<Address>().unwrap_err();
    assert!(err.to_string().contains("0xzz"));
}

#[test]
fn test_address_arithmetic()
{
    let addr = Address::new(0x1000);
    assert_eq!(addr + 0x30, Address::new(0x1030));
    assert_eq!(addr.checked_add(u64::MAX), None);
    assert_eq!(Address::new(0x1030).offset_from(addr), Some(0x30));
    assert_eq!(addr.offset_from(Address::new(0x1030)), None);
    assert!(Address::ZERO.is_null());
}

#[test]
fn test_type_flags()
{
    let flags = TypeFlags::from_bits(TypeFlags::UNCOMMON | TypeFlags::NAMED);
    assert!(flags.contains(TypeFlags::UNCOMMON));
    assert!(flags.contains(TypeFlags::NAMED));
    assert!(!flags.contains(TypeFlags::EXTRA_STAR));
    assert_eq!(flags.to_string(), "0x05 (uncommon|named)");
    assert_eq!(TypeFlags::default().to_string(), "0x00");
}

#[test]
fn test_type_ref_new()
{
    let target = TypeRef::new(Address::new(0x2000), "*os.File");
    assert_eq!(target.address, Address::new(0x2000));
    assert_eq!(target.name, "*os.File");
}
