// FlatBuffers bindings for the release manifest schema:
//
//   table Chunk    { hash:[byte]; size:long; offset:long; }
//   table File     { name:string; size:long; hash:[byte]; chunks:[Chunk];
//                    executable:bool; symlink:string; }
//   table Bundle   { hash:[byte]; chunks:[Chunk]; }
//   table Fragment { name:string; files:[File]; bundles:[Bundle]; }
//   table Manifest { fragments:[Fragment]; }
//   root_type Manifest;
//
// Laid out the way flatc emits Rust bindings; keep in sync with the schema.
#![allow(
    unsafe_code,
    missing_docs,
    missing_debug_implementations,
    unreachable_pub,
    clippy::all,
    clippy::pedantic
)]

use flatbuffers::{ForwardsUOffset, Vector, VOffsetT, WIPOffset};

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, PartialEq)]
pub struct Chunk<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for Chunk<'a> {
    type Inner = Chunk<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { flatbuffers::Table::new(buf, loc) },
        }
    }
}

impl<'a> Chunk<'a> {
    pub const VT_HASH: VOffsetT = 4;
    pub const VT_SIZE: VOffsetT = 6;
    pub const VT_OFFSET: VOffsetT = 8;

    #[allow(unused_mut)]
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr, A: flatbuffers::Allocator + 'bldr>(
        fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr, A>,
        args: &'args ChunkArgs<'args>,
    ) -> WIPOffset<Chunk<'bldr>> {
        let mut builder = ChunkBuilder::new(fbb);
        builder.add_offset(args.offset);
        builder.add_size(args.size);
        if let Some(x) = args.hash {
            builder.add_hash(x);
        }
        builder.finish()
    }

    #[inline]
    pub fn hash(&self) -> Option<Vector<'a, i8>> {
        // Safety: created from a verified table holding a byte vector in this slot.
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, i8>>>(Chunk::VT_HASH, None)
        }
    }

    #[inline]
    pub fn size(&self) -> i64 {
        unsafe { self._tab.get::<i64>(Chunk::VT_SIZE, Some(0)).unwrap() }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        unsafe { self._tab.get::<i64>(Chunk::VT_OFFSET, Some(0)).unwrap() }
    }
}

impl flatbuffers::Verifiable for Chunk<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, i8>>>("hash", Self::VT_HASH, false)?
            .visit_field::<i64>("size", Self::VT_SIZE, false)?
            .visit_field::<i64>("offset", Self::VT_OFFSET, false)?
            .finish();
        Ok(())
    }
}

pub struct ChunkArgs<'a> {
    pub hash: Option<WIPOffset<Vector<'a, i8>>>,
    pub size: i64,
    pub offset: i64,
}

pub struct ChunkBuilder<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> {
    fbb_: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
    start_: WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> ChunkBuilder<'a, 'b, A> {
    #[inline]
    pub fn add_hash(&mut self, hash: WIPOffset<Vector<'b, i8>>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(Chunk::VT_HASH, hash);
    }
    #[inline]
    pub fn add_size(&mut self, size: i64) {
        self.fbb_.push_slot::<i64>(Chunk::VT_SIZE, size, 0);
    }
    #[inline]
    pub fn add_offset(&mut self, offset: i64) {
        self.fbb_.push_slot::<i64>(Chunk::VT_OFFSET, offset, 0);
    }
    #[inline]
    pub fn new(fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>) -> ChunkBuilder<'a, 'b, A> {
        let start = fbb.start_table();
        ChunkBuilder {
            fbb_: fbb,
            start_: start,
        }
    }
    #[inline]
    pub fn finish(self) -> WIPOffset<Chunk<'a>> {
        let o = self.fbb_.end_table(self.start_);
        WIPOffset::new(o.value())
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, PartialEq)]
pub struct File<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for File<'a> {
    type Inner = File<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { flatbuffers::Table::new(buf, loc) },
        }
    }
}

impl<'a> File<'a> {
    pub const VT_NAME: VOffsetT = 4;
    pub const VT_SIZE: VOffsetT = 6;
    pub const VT_HASH: VOffsetT = 8;
    pub const VT_CHUNKS: VOffsetT = 10;
    pub const VT_EXECUTABLE: VOffsetT = 12;
    pub const VT_SYMLINK: VOffsetT = 14;

    #[allow(unused_mut)]
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr, A: flatbuffers::Allocator + 'bldr>(
        fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr, A>,
        args: &'args FileArgs<'args>,
    ) -> WIPOffset<File<'bldr>> {
        let mut builder = FileBuilder::new(fbb);
        builder.add_size(args.size);
        if let Some(x) = args.symlink {
            builder.add_symlink(x);
        }
        if let Some(x) = args.chunks {
            builder.add_chunks(x);
        }
        if let Some(x) = args.hash {
            builder.add_hash(x);
        }
        if let Some(x) = args.name {
            builder.add_name(x);
        }
        builder.add_executable(args.executable);
        builder.finish()
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(File::VT_NAME, None) }
    }

    #[inline]
    pub fn size(&self) -> i64 {
        unsafe { self._tab.get::<i64>(File::VT_SIZE, Some(0)).unwrap() }
    }

    #[inline]
    pub fn hash(&self) -> Option<Vector<'a, i8>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, i8>>>(File::VT_HASH, None)
        }
    }

    #[inline]
    pub fn chunks(&self) -> Option<Vector<'a, ForwardsUOffset<Chunk<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Chunk>>>>(File::VT_CHUNKS, None)
        }
    }

    #[inline]
    pub fn executable(&self) -> bool {
        unsafe {
            self._tab
                .get::<bool>(File::VT_EXECUTABLE, Some(false))
                .unwrap()
        }
    }

    #[inline]
    pub fn symlink(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(File::VT_SYMLINK, None) }
    }
}

impl flatbuffers::Verifiable for File<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<i64>("size", Self::VT_SIZE, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i8>>>("hash", Self::VT_HASH, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Chunk>>>>(
                "chunks",
                Self::VT_CHUNKS,
                false,
            )?
            .visit_field::<bool>("executable", Self::VT_EXECUTABLE, false)?
            .visit_field::<ForwardsUOffset<&str>>("symlink", Self::VT_SYMLINK, false)?
            .finish();
        Ok(())
    }
}

pub struct FileArgs<'a> {
    pub name: Option<WIPOffset<&'a str>>,
    pub size: i64,
    pub hash: Option<WIPOffset<Vector<'a, i8>>>,
    pub chunks: Option<WIPOffset<Vector<'a, ForwardsUOffset<Chunk<'a>>>>>,
    pub executable: bool,
    pub symlink: Option<WIPOffset<&'a str>>,
}

pub struct FileBuilder<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> {
    fbb_: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
    start_: WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> FileBuilder<'a, 'b, A> {
    #[inline]
    pub fn add_name(&mut self, name: WIPOffset<&'b str>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(File::VT_NAME, name);
    }
    #[inline]
    pub fn add_size(&mut self, size: i64) {
        self.fbb_.push_slot::<i64>(File::VT_SIZE, size, 0);
    }
    #[inline]
    pub fn add_hash(&mut self, hash: WIPOffset<Vector<'b, i8>>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(File::VT_HASH, hash);
    }
    #[inline]
    pub fn add_chunks(&mut self, chunks: WIPOffset<Vector<'b, ForwardsUOffset<Chunk<'b>>>>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(File::VT_CHUNKS, chunks);
    }
    #[inline]
    pub fn add_executable(&mut self, executable: bool) {
        self.fbb_
            .push_slot::<bool>(File::VT_EXECUTABLE, executable, false);
    }
    #[inline]
    pub fn add_symlink(&mut self, symlink: WIPOffset<&'b str>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(File::VT_SYMLINK, symlink);
    }
    #[inline]
    pub fn new(fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>) -> FileBuilder<'a, 'b, A> {
        let start = fbb.start_table();
        FileBuilder {
            fbb_: fbb,
            start_: start,
        }
    }
    #[inline]
    pub fn finish(self) -> WIPOffset<File<'a>> {
        let o = self.fbb_.end_table(self.start_);
        WIPOffset::new(o.value())
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, PartialEq)]
pub struct Bundle<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for Bundle<'a> {
    type Inner = Bundle<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { flatbuffers::Table::new(buf, loc) },
        }
    }
}

impl<'a> Bundle<'a> {
    pub const VT_HASH: VOffsetT = 4;
    pub const VT_CHUNKS: VOffsetT = 6;

    #[allow(unused_mut)]
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr, A: flatbuffers::Allocator + 'bldr>(
        fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr, A>,
        args: &'args BundleArgs<'args>,
    ) -> WIPOffset<Bundle<'bldr>> {
        let mut builder = BundleBuilder::new(fbb);
        if let Some(x) = args.chunks {
            builder.add_chunks(x);
        }
        if let Some(x) = args.hash {
            builder.add_hash(x);
        }
        builder.finish()
    }

    #[inline]
    pub fn hash(&self) -> Option<Vector<'a, i8>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, i8>>>(Bundle::VT_HASH, None)
        }
    }

    #[inline]
    pub fn chunks(&self) -> Option<Vector<'a, ForwardsUOffset<Chunk<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Chunk>>>>(Bundle::VT_CHUNKS, None)
        }
    }
}

impl flatbuffers::Verifiable for Bundle<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, i8>>>("hash", Self::VT_HASH, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Chunk>>>>(
                "chunks",
                Self::VT_CHUNKS,
                false,
            )?
            .finish();
        Ok(())
    }
}

pub struct BundleArgs<'a> {
    pub hash: Option<WIPOffset<Vector<'a, i8>>>,
    pub chunks: Option<WIPOffset<Vector<'a, ForwardsUOffset<Chunk<'a>>>>>,
}

pub struct BundleBuilder<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> {
    fbb_: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
    start_: WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> BundleBuilder<'a, 'b, A> {
    #[inline]
    pub fn add_hash(&mut self, hash: WIPOffset<Vector<'b, i8>>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(Bundle::VT_HASH, hash);
    }
    #[inline]
    pub fn add_chunks(&mut self, chunks: WIPOffset<Vector<'b, ForwardsUOffset<Chunk<'b>>>>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(Bundle::VT_CHUNKS, chunks);
    }
    #[inline]
    pub fn new(fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>) -> BundleBuilder<'a, 'b, A> {
        let start = fbb.start_table();
        BundleBuilder {
            fbb_: fbb,
            start_: start,
        }
    }
    #[inline]
    pub fn finish(self) -> WIPOffset<Bundle<'a>> {
        let o = self.fbb_.end_table(self.start_);
        WIPOffset::new(o.value())
    }
}

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, PartialEq)]
pub struct Fragment<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for Fragment<'a> {
    type Inner = Fragment<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { flatbuffers::Table::new(buf, loc) },
        }
    }
}

impl<'a> Fragment<'a> {
    pub const VT_NAME: VOffsetT = 4;
    pub const VT_FILES: VOffsetT = 6;
    pub const VT_BUNDLES: VOffsetT = 8;

    #[allow(unused_mut)]
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr, A: flatbuffers::Allocator + 'bldr>(
        fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr, A>,
        args: &'args FragmentArgs<'args>,
    ) -> WIPOffset<Fragment<'bldr>> {
        let mut builder = FragmentBuilder::new(fbb);
        if let Some(x) = args.bundles {
            builder.add_bundles(x);
        }
        if let Some(x) = args.files {
            builder.add_files(x);
        }
        if let Some(x) = args.name {
            builder.add_name(x);
        }
        builder.finish()
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Fragment::VT_NAME, None) }
    }

    #[inline]
    pub fn files(&self) -> Option<Vector<'a, ForwardsUOffset<File<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<File>>>>(Fragment::VT_FILES, None)
        }
    }

    #[inline]
    pub fn bundles(&self) -> Option<Vector<'a, ForwardsUOffset<Bundle<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Bundle>>>>(
                    Fragment::VT_BUNDLES,
                    None,
                )
        }
    }
}

impl flatbuffers::Verifiable for Fragment<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<File>>>>(
                "files",
                Self::VT_FILES,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Bundle>>>>(
                "bundles",
                Self::VT_BUNDLES,
                false,
            )?
            .finish();
        Ok(())
    }
}

pub struct FragmentArgs<'a> {
    pub name: Option<WIPOffset<&'a str>>,
    pub files: Option<WIPOffset<Vector<'a, ForwardsUOffset<File<'a>>>>>,
    pub bundles: Option<WIPOffset<Vector<'a, ForwardsUOffset<Bundle<'a>>>>>,
}

pub struct FragmentBuilder<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> {
    fbb_: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
    start_: WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> FragmentBuilder<'a, 'b, A> {
    #[inline]
    pub fn add_name(&mut self, name: WIPOffset<&'b str>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(Fragment::VT_NAME, name);
    }
    #[inline]
    pub fn add_files(&mut self, files: WIPOffset<Vector<'b, ForwardsUOffset<File<'b>>>>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(Fragment::VT_FILES, files);
    }
    #[inline]
    pub fn add_bundles(&mut self, bundles: WIPOffset<Vector<'b, ForwardsUOffset<Bundle<'b>>>>) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(Fragment::VT_BUNDLES, bundles);
    }
    #[inline]
    pub fn new(fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>) -> FragmentBuilder<'a, 'b, A> {
        let start = fbb.start_table();
        FragmentBuilder {
            fbb_: fbb,
            start_: start,
        }
    }
    #[inline]
    pub fn finish(self) -> WIPOffset<Fragment<'a>> {
        let o = self.fbb_.end_table(self.start_);
        WIPOffset::new(o.value())
    }
}

// ---------------------------------------------------------------------------
// Manifest (root)
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, PartialEq)]
pub struct Manifest<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for Manifest<'a> {
    type Inner = Manifest<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { flatbuffers::Table::new(buf, loc) },
        }
    }
}

impl<'a> Manifest<'a> {
    pub const VT_FRAGMENTS: VOffsetT = 4;

    #[allow(unused_mut)]
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr, A: flatbuffers::Allocator + 'bldr>(
        fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr, A>,
        args: &'args ManifestArgs<'args>,
    ) -> WIPOffset<Manifest<'bldr>> {
        let mut builder = ManifestBuilder::new(fbb);
        if let Some(x) = args.fragments {
            builder.add_fragments(x);
        }
        builder.finish()
    }

    #[inline]
    pub fn fragments(&self) -> Option<Vector<'a, ForwardsUOffset<Fragment<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Fragment>>>>(
                    Manifest::VT_FRAGMENTS,
                    None,
                )
        }
    }
}

impl flatbuffers::Verifiable for Manifest<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Fragment>>>>(
                "fragments",
                Self::VT_FRAGMENTS,
                false,
            )?
            .finish();
        Ok(())
    }
}

pub struct ManifestArgs<'a> {
    pub fragments: Option<WIPOffset<Vector<'a, ForwardsUOffset<Fragment<'a>>>>>,
}

pub struct ManifestBuilder<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> {
    fbb_: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
    start_: WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> ManifestBuilder<'a, 'b, A> {
    #[inline]
    pub fn add_fragments(
        &mut self,
        fragments: WIPOffset<Vector<'b, ForwardsUOffset<Fragment<'b>>>>,
    ) {
        self.fbb_
            .push_slot_always::<WIPOffset<_>>(Manifest::VT_FRAGMENTS, fragments);
    }
    #[inline]
    pub fn new(fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>) -> ManifestBuilder<'a, 'b, A> {
        let start = fbb.start_table();
        ManifestBuilder {
            fbb_: fbb,
            start_: start,
        }
    }
    #[inline]
    pub fn finish(self) -> WIPOffset<Manifest<'a>> {
        let o = self.fbb_.end_table(self.start_);
        WIPOffset::new(o.value())
    }
}
