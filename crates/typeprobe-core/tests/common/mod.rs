//! Shared fixtures: hand-laid metadata sections.

#![allow(dead_code)]

use typeprobe_core::{Address, Section, SectionIndex};

pub const RODATA_BASE: u64 = 0x0048_0000;
pub const DATA_BASE: u64 = 0x0060_0000;

/// Encode a name record: flag byte, uvarint length, raw bytes.
pub fn name_record(text: &str) -> Vec<u8>
{
    let mut out = vec![0x01];
    let mut len = text.len() as u64;
    loop {
        let byte = (len & 0x7f) as u8;
        len >>= 7;
        if len == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
    out.extend_from_slice(text.as_bytes());
    out
}

/// Fields of an on-disk type descriptor.
#[derive(Debug, Clone, Copy)]
pub struct TypeFixture
{
    pub size: u64,
    pub ptr_data: u64,
    pub hash: u32,
    pub tflag: u8,
    pub align: u8,
    pub field_align: u8,
    pub kind: u8,
    pub equal_fn: u64,
    pub gc_data: u64,
    pub name_off: u32,
    pub ptr_to_this: u32,
}

impl TypeFixture
{
    pub fn named(name_off: u32) -> Self
    {
        Self {
            size: 8,
            ptr_data: 8,
            hash: 0xdead_beef,
            tflag: 0x04,
            align: 8,
            field_align: 8,
            kind: 0x16,
            equal_fn: 0x0040_1000,
            gc_data: 0x0048_f000,
            name_off,
            ptr_to_this: 0,
        }
    }

    pub fn encode(&self) -> Vec<u8>
    {
        let mut out = Vec::with_capacity(48);
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.ptr_data.to_le_bytes());
        out.extend_from_slice(&self.hash.to_le_bytes());
        out.extend_from_slice(&[self.tflag, self.align, self.field_align, self.kind]);
        out.extend_from_slice(&self.equal_fn.to_le_bytes());
        out.extend_from_slice(&self.gc_data.to_le_bytes());
        out.extend_from_slice(&self.name_off.to_le_bytes());
        out.extend_from_slice(&self.ptr_to_this.to_le_bytes());
        assert_eq!(out.len(), 48);
        out
    }
}

/// A section under construction; writes grow it as needed.
pub struct Blob
{
    pub name: &'static str,
    pub base: u64,
    pub bytes: Vec<u8>,
}

impl Blob
{
    pub fn new(name: &'static str, base: u64) -> Self
    {
        Self {
            name,
            base,
            bytes: Vec::new(),
        }
    }

    pub fn put(&mut self, offset: usize, bytes: &[u8]) -> &mut Self
    {
        let end = offset + bytes.len();
        if self.bytes.len() < end {
            self.bytes.resize(end, 0);
        }
        self.bytes[offset..end].copy_from_slice(bytes);
        self
    }

    pub fn put_u64(&mut self, offset: usize, value: u64) -> &mut Self
    {
        self.put(offset, &value.to_le_bytes())
    }

    pub fn put_u32(&mut self, offset: usize, value: u32) -> &mut Self
    {
        self.put(offset, &value.to_le_bytes())
    }

    /// Write a name record and return its offset for use as a name offset.
    pub fn put_name(&mut self, offset: usize, text: &str) -> u32
    {
        self.put(offset, &name_record(text));
        u32::try_from(offset).unwrap()
    }

    pub fn put_type(&mut self, offset: usize, fixture: TypeFixture) -> &mut Self
    {
        self.put(offset, &fixture.encode())
    }

    /// Write a `{ data, len, cap }` slice header.
    pub fn put_slice_header(&mut self, offset: usize, data: u64, len: u64) -> &mut Self
    {
        self.put_u64(offset, data).put_u64(offset + 8, len).put_u64(offset + 16, len)
    }

    pub fn addr(&self, offset: usize) -> Address
    {
        Address::new(self.base + offset as u64)
    }

    pub fn section(&self) -> Section
    {
        Section::from_bytes(self.name, Address::new(self.base), self.bytes.clone())
    }
}

// Offsets inside the fixture's .rodata.
pub const ERROR_TYPE: usize = 0x100;
pub const READER_IFACE: usize = 0x200;
pub const READ_METHODS: usize = 0x300;
pub const READ_FUNC_TYPE: usize = 0x340;
pub const OS_FILE_PTR: usize = 0x400;
pub const OS_FILE: usize = 0x440;
pub const SELF_LOOP: usize = 0x500;
pub const CYCLE_A: usize = 0x540;
pub const CYCLE_B: usize = 0x580;
pub const DANGLING: usize = 0x5c0;
pub const EMPTY_IFACE: usize = 0x600;
pub const STREAM_IFACE: usize = 0x660;
pub const STREAM_METHODS: usize = 0x700;
pub const CLOSE_FUNC_TYPE: usize = 0x740;
pub const BROKEN_METHODS_IFACE: usize = 0x780;
pub const BROKEN_METHODS: usize = 0x7e0;
/// Type offset in the broken method slice that lands outside every section.
pub const UNMAPPED_TYPE_OFF: u32 = 0x00ff_0000;
pub const TRUNCATED_TYPE: usize = 0x1100;

// Offsets inside the fixture's .data.rel.ro.
pub const READER_ITAB: usize = 0x20;
pub const BROKEN_ITAB: usize = 0x40;

/// The standard fixture: an `io.Reader` interface, an `*os.File` type, an
/// itab binding them, and a handful of edge-case records.
pub fn fixture_blobs() -> (Blob, Blob)
{
    let mut rodata = Blob::new(".rodata", RODATA_BASE);

    let error_name = rodata.put_name(0x1000, "error");
    let reader_name = rodata.put_name(0x1010, "io.Reader");
    let io_name = rodata.put_name(0x1020, "io");
    let read_name = rodata.put_name(0x1030, "Read");
    let func_name = rodata.put_name(0x1040, "func([]uint8) (int, error)");
    let file_ptr_name = rodata.put_name(0x1060, "*os.File");
    let file_name = rodata.put_name(0x1070, "os.File");
    let loop_name = rodata.put_name(0x1080, "main.Loop");
    let a_name = rodata.put_name(0x1090, "main.A");
    let b_name = rodata.put_name(0x10a0, "main.B");
    let dangling_name = rodata.put_name(0x10b0, "main.Dangling");
    let any_name = rodata.put_name(0x10c0, "interface {}");

    rodata.put_type(ERROR_TYPE, TypeFixture {
        size: 8,
        kind: 0x51,
        ..TypeFixture::named(error_name)
    });

    // io.Reader: type descriptor, package path pointer, method slice header.
    rodata.put_type(READER_IFACE, TypeFixture {
        size: 16,
        kind: 0x14,
        ..TypeFixture::named(reader_name)
    });
    rodata.put_u64(READER_IFACE + 48, RODATA_BASE + u64::from(io_name));
    rodata.put_slice_header(READER_IFACE + 56, RODATA_BASE + READ_METHODS as u64, 1);
    rodata.put_u32(READ_METHODS, read_name);
    rodata.put_u32(READ_METHODS + 4, READ_FUNC_TYPE as u32);
    rodata.put_type(READ_FUNC_TYPE, TypeFixture {
        kind: 0x33,
        ..TypeFixture::named(func_name)
    });

    // *os.File and os.File point at each other through pointer-to-this.
    rodata.put_type(OS_FILE_PTR, TypeFixture {
        kind: 0x36,
        ..TypeFixture::named(file_ptr_name)
    });
    rodata.put_type(OS_FILE, TypeFixture {
        size: 8,
        kind: 0x19,
        ptr_to_this: OS_FILE_PTR as u32,
        ..TypeFixture::named(file_name)
    });

    rodata.put_type(SELF_LOOP, TypeFixture {
        ptr_to_this: SELF_LOOP as u32,
        ..TypeFixture::named(loop_name)
    });
    rodata.put_type(CYCLE_A, TypeFixture {
        ptr_to_this: CYCLE_B as u32,
        ..TypeFixture::named(a_name)
    });
    rodata.put_type(CYCLE_B, TypeFixture {
        ptr_to_this: CYCLE_A as u32,
        ..TypeFixture::named(b_name)
    });
    rodata.put_type(DANGLING, TypeFixture {
        ptr_to_this: 0x00ff_0000,
        ..TypeFixture::named(dangling_name)
    });

    // interface {}: no package path, no methods.
    rodata.put_type(EMPTY_IFACE, TypeFixture {
        size: 16,
        kind: 0x14,
        ..TypeFixture::named(any_name)
    });
    rodata.put_u64(EMPTY_IFACE + 48, 0);
    rodata.put_slice_header(EMPTY_IFACE + 56, 0, 0);

    // io.ReadWriteCloser: three methods stored out of name order.
    let rwc_name = rodata.put_name(0x900, "io.ReadWriteCloser");
    let write_name = rodata.put_name(0x920, "Write");
    let close_name = rodata.put_name(0x930, "Close");
    let close_func_name = rodata.put_name(0x940, "func() error");
    let broken_name = rodata.put_name(0x960, "main.BrokenMethods");

    rodata.put_type(STREAM_IFACE, TypeFixture {
        size: 16,
        kind: 0x14,
        ..TypeFixture::named(rwc_name)
    });
    rodata.put_u64(STREAM_IFACE + 48, RODATA_BASE + u64::from(io_name));
    rodata.put_slice_header(STREAM_IFACE + 56, RODATA_BASE + STREAM_METHODS as u64, 3);
    rodata.put_u32(STREAM_METHODS, write_name);
    rodata.put_u32(STREAM_METHODS + 4, READ_FUNC_TYPE as u32);
    rodata.put_u32(STREAM_METHODS + 8, close_name);
    rodata.put_u32(STREAM_METHODS + 12, CLOSE_FUNC_TYPE as u32);
    rodata.put_u32(STREAM_METHODS + 16, read_name);
    rodata.put_u32(STREAM_METHODS + 20, READ_FUNC_TYPE as u32);
    rodata.put_type(CLOSE_FUNC_TYPE, TypeFixture {
        kind: 0x33,
        ..TypeFixture::named(close_func_name)
    });

    // Same shape, but the second method's type offset points nowhere.
    rodata.put_type(BROKEN_METHODS_IFACE, TypeFixture {
        size: 16,
        kind: 0x14,
        ..TypeFixture::named(broken_name)
    });
    rodata.put_u64(BROKEN_METHODS_IFACE + 48, 0);
    rodata.put_slice_header(BROKEN_METHODS_IFACE + 56, RODATA_BASE + BROKEN_METHODS as u64, 3);
    rodata.put_u32(BROKEN_METHODS, read_name);
    rodata.put_u32(BROKEN_METHODS + 4, READ_FUNC_TYPE as u32);
    rodata.put_u32(BROKEN_METHODS + 8, write_name);
    rodata.put_u32(BROKEN_METHODS + 12, UNMAPPED_TYPE_OFF);
    rodata.put_u32(BROKEN_METHODS + 16, close_name);
    rodata.put_u32(BROKEN_METHODS + 20, CLOSE_FUNC_TYPE as u32);

    // Only 40 of 48 bytes, and nothing after it: the section ends mid-record.
    let tail = TypeFixture::named(error_name).encode();
    rodata.put(TRUNCATED_TYPE, &tail[..40]);

    let mut data = Blob::new(".data.rel.ro", DATA_BASE);
    data.put_u64(READER_ITAB, RODATA_BASE + READER_IFACE as u64);
    data.put_u64(READER_ITAB + 8, RODATA_BASE + OS_FILE_PTR as u64);
    data.put_u64(BROKEN_ITAB, RODATA_BASE + READER_IFACE as u64);
    data.put_u64(BROKEN_ITAB + 8, 0xdead_0000);
    data.put_u64(BROKEN_ITAB + 16, 0);

    (rodata, data)
}

pub fn fixture_sections() -> SectionIndex
{
    let (rodata, data) = fixture_blobs();
    SectionIndex::new(vec![rodata.section(), data.section()])
}
