use crate::constants::SAVE_VERSION_MAGIC;
use crate::game_state::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Manages saving and loading game state with a checksummed binary
/// format.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager instance.
    ///
    /// Sets up the save directory at the appropriate location for the
    /// platform using the `directories` crate.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "idle-automata").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Creates a SaveManager writing to an explicit path (used by tests).
    pub fn from_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn save_path(&self) -> &PathBuf {
        &self.save_path
    }

    /// Saves the game state to disk with checksum verification.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized game state (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, state: &GameState) -> io::Result<()> {
        let data = bincode::serialize(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let data_len = data.len() as u32;

        // Checksum covers version + length + data
        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Loads the game state from disk with checksum verification.
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The version magic is incorrect
    /// - The checksum verification fails
    /// - The data cannot be deserialized
    pub fn load(&self) -> io::Result<GameState> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);

        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        let state = bincode::deserialize(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(state)
    }

    /// Loads the saved state, falling back to a fresh default when the
    /// save is missing, truncated, or corrupt. Corrupted data is
    /// discarded, not repaired.
    pub fn load_or_default(&self, current_time: i64) -> GameState {
        self.load().unwrap_or_else(|_| GameState::new(current_time))
    }

    /// Checks if a save file exists.
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
