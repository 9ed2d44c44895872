//! On-disk corpus fixtures: a SQLite decision store, a flat index and its metadata,
//! written into a temporary directory and described by a [`Config`].

use std::path::Path;

use tempfile::TempDir;

use emsal::config::Config;
use emsal::embedding::{DEFAULT_STUB_DIM, Embedder, SentenceEmbedder};
use emsal::index::{ChunkMetadata, FlatIpIndex, write_chunk_metadata};
use emsal::store::{DecisionRecord, SqliteDecisionStore};

/// A corpus on disk plus the config pointing at it. The directory lives as long as
/// the fixture.
pub struct CorpusFixture {
    pub dir: TempDir,
    pub config: Config,
}

impl CorpusFixture {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Builds a corpus whose chunk vectors come from the stub embedder, so searches
/// through [`emsal::DefaultRetriever::open`] run without model files.
#[derive(Default)]
pub struct CorpusBuilder {
    decisions: Vec<DecisionRecord>,
    chunks: Vec<ChunkMetadata>,
    orphan_rows: usize,
    index_dim: Option<usize>,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a decision row and one indexed chunk per snippet.
    pub fn decision(mut self, record: DecisionRecord, snippets: &[&str]) -> Self {
        for snippet in snippets {
            self.chunks.push(ChunkMetadata::new(record.id, *snippet));
        }
        self.decisions.push(record);
        self
    }

    /// Adds an indexed chunk whose decision id has no row in the store.
    pub fn dangling_chunk(mut self, id: i64, snippet: &str) -> Self {
        self.chunks.push(ChunkMetadata::new(id, snippet));
        self
    }

    /// Appends index rows with no metadata entry.
    pub fn orphan_rows(mut self, count: usize) -> Self {
        self.orphan_rows = count;
        self
    }

    /// Writes the index with a different dimension than the stub embedder.
    pub fn index_dim(mut self, dim: usize) -> Self {
        self.index_dim = Some(dim);
        self
    }

    pub fn build(self) -> CorpusFixture {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            db_path: dir.path().join("decisions.sqlite"),
            index_path: dir.path().join("chunks.index"),
            meta_path: dir.path().join("meta.json"),
            ..Default::default()
        };

        let store = SqliteDecisionStore::initialize(&config.db_path).expect("create store");
        for record in &self.decisions {
            store
                .insert(record, Some(&format!("https://karar.example/{}", record.id)))
                .expect("insert decision");
        }

        let embedder = SentenceEmbedder::stub().expect("stub embedder");
        let dim = self.index_dim.unwrap_or(DEFAULT_STUB_DIM);
        let mut rows: Vec<Vec<f32>> = self
            .chunks
            .iter()
            .map(|chunk| {
                let mut row = embedder.embed(chunk.snippet()).expect("embed chunk");
                row.resize(dim, 0.0);
                row
            })
            .collect();
        for i in 0..self.orphan_rows {
            let mut row = embedder
                .embed(&format!("orphan {i}"))
                .expect("embed orphan");
            row.resize(dim, 0.0);
            rows.push(row);
        }

        FlatIpIndex::write(&config.index_path, dim, &rows).expect("write index");
        write_chunk_metadata(&config.meta_path, &self.chunks).expect("write metadata");

        CorpusFixture { dir, config }
    }
}

pub fn decision(id: i64, chamber: &str, text: &str) -> DecisionRecord {
    DecisionRecord::new(id)
        .with_chamber(chamber)
        .with_numbers(format!("2022/{id}"), format!("2023/{}", id * 10))
        .with_date("15.06.2023")
        .with_text(text)
}

/// Five family-law decisions, one chunk each.
pub fn family_law_corpus() -> CorpusBuilder {
    CorpusBuilder::new()
        .decision(
            decision(
                1,
                "Yargıtay 2. Hukuk Dairesi",
                "Nafaka artırım talebi yerinde görülmüş, kabul edildi.",
            ),
            &["nafaka artırım talebi kabul edildi"],
        )
        .decision(
            decision(
                2,
                "Yargıtay Hukuk Genel Kurulu",
                "Boşanma sonrası nafaka miktarı hakkaniyete uygun belirlenmelidir.",
            ),
            &["boşanma sonrası nafaka miktarı"],
        )
        .decision(
            decision(3, "Yargıtay 2. Hukuk Dairesi", "Velayet düzenlemesi yeniden yapılmalıdır."),
            &["velayet düzenlemesi"],
        )
        .decision(
            decision(
                4,
                "Bölge Adliye Mahkemesi 2024",
                "Tedbir nafakasının başlangıç tarihi dava tarihidir.",
            ),
            &["tedbir nafakası başlangıç tarihi"],
        )
        .decision(
            decision(5, "Anayasa Mahkemesi", "Aile hayatına saygı hakkı ihlal edilmiştir."),
            &["aile hayatına saygı hakkı"],
        )
}
