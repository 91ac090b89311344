//! Launch configuration.
//!
//! Everything the launcher would otherwise read from ambient process state
//! lives here and is passed in explicitly. Values default to the layout of
//! the platform's Nextflow runtime image and can be overridden through
//! `PHAGELAUNCH_*` environment variables or command-line flags.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Environment variable carrying the execution-identity token.
pub const EXECUTION_TOKEN_VAR: &str = "FLYTE_INTERNAL_EXECUTION_ID";

/// Environment variable carrying the platform-assigned execution name.
pub const EXECUTION_NAME_VAR: &str = "PHAGELAUNCH_EXECUTION_NAME";

const DISPATCHER_URL: &str =
    "http://nf-dispatcher-service.flyte.svc.cluster.local/provision-storage";
const LOG_REMOTE_PREFIX: &str = "latch:///your_log_dir/nf_nf_core_phageannotator";

/// Directory names never copied into the shared volume.
pub const STAGING_IGNORE: [&str; 9] = [
    "latch",
    ".latch",
    "nextflow",
    ".nextflow",
    "work",
    "results",
    "miniconda",
    "anaconda3",
    "mambaforge",
];

/// Configuration for one launch.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    /// Storage provisioning endpoint.
    pub dispatcher_url: String,
    /// Size of the shared volume to request, in GiB.
    pub storage_gib: u32,
    /// Execution-identity token sent to the dispatcher.
    pub execution_token: Option<String>,
    /// Platform-assigned execution name, used to namespace the uploaded log.
    pub execution_name: Option<String>,
    /// Directory holding the packaged pipeline sources.
    pub source_dir: PathBuf,
    /// Mount point of the shared volume.
    pub shared_dir: PathBuf,
    /// Names skipped at every level while staging.
    pub staging_ignore: Vec<String>,
    /// Nextflow launcher binary.
    pub nextflow_bin: PathBuf,
    /// Pipeline entry script, relative to the shared directory.
    pub entry_script: String,
    /// Nextflow profile.
    pub profile: String,
    /// Extra Nextflow config file passed with `-c`.
    pub config_file: String,
    /// Nextflow log file, relative to the shared directory.
    pub log_file: String,
    /// Remote prefix the log is uploaded under.
    pub log_remote_prefix: String,
    /// `NXF_HOME` for the pipeline process.
    pub nxf_home: PathBuf,
    /// JVM options passed through `NXF_OPTS`.
    pub nxf_opts: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            dispatcher_url: DISPATCHER_URL.to_string(),
            storage_gib: 100,
            execution_token: None,
            execution_name: None,
            source_dir: PathBuf::from("/root"),
            shared_dir: PathBuf::from("/nf-workdir"),
            staging_ignore: STAGING_IGNORE.iter().map(ToString::to_string).collect(),
            nextflow_bin: PathBuf::from("/root/nextflow"),
            entry_script: "main.nf".to_string(),
            profile: "docker".to_string(),
            config_file: "latch.config".to_string(),
            log_file: ".nextflow.log".to_string(),
            log_remote_prefix: LOG_REMOTE_PREFIX.to_string(),
            nxf_home: PathBuf::from("/root/.nextflow"),
            nxf_opts: "-Xms2048M -Xmx8G -XX:ActiveProcessorCount=4".to_string(),
        }
    }
}

impl LaunchConfig {
    /// Builds a config from the process environment, loading `.env` first.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is present but malformed.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env is the common case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PHAGELAUNCH_STORAGE_GIB` is not a number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |suffix: &str| lookup(&format!("PHAGELAUNCH_{suffix}")).filter(|v| !v.is_empty());

        config.execution_token = lookup(EXECUTION_TOKEN_VAR).filter(|v| !v.is_empty());
        config.execution_name = lookup(EXECUTION_NAME_VAR).filter(|v| !v.is_empty());

        if let Some(url) = var("DISPATCHER_URL") {
            config.dispatcher_url = url;
        }
        if let Some(size) = var("STORAGE_GIB") {
            config.storage_gib = size
                .parse()
                .map_err(|e| format!("Invalid PHAGELAUNCH_STORAGE_GIB {size:?}: {e}"))?;
        }
        if let Some(dir) = var("SOURCE_DIR") {
            config.source_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var("SHARED_DIR") {
            config.shared_dir = PathBuf::from(dir);
        }
        if let Some(bin) = var("NEXTFLOW_BIN") {
            config.nextflow_bin = PathBuf::from(bin);
        }
        if let Some(script) = var("ENTRY_SCRIPT") {
            config.entry_script = script;
        }
        if let Some(profile) = var("PROFILE") {
            config.profile = profile;
        }
        if let Some(file) = var("CONFIG_FILE") {
            config.config_file = file;
        }
        if let Some(file) = var("LOG_FILE") {
            config.log_file = file;
        }
        if let Some(prefix) = var("LOG_REMOTE_PREFIX") {
            config.log_remote_prefix = prefix;
        }
        if let Some(home) = var("NXF_HOME") {
            config.nxf_home = PathBuf::from(home);
        }
        if let Some(opts) = var("NXF_OPTS") {
            config.nxf_opts = opts;
        }
        Ok(config)
    }

    /// Absolute path of the Nextflow log inside the shared directory.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.shared_dir.join(&self.log_file)
    }

    /// Remote destination of the log for `execution_name`.
    #[must_use]
    pub fn log_destination(&self, execution_name: &str) -> String {
        format!(
            "{}/{}/nextflow.log",
            self.log_remote_prefix.trim_end_matches('/'),
            execution_name.trim_matches('/')
        )
    }

    /// Environment overlay applied on top of the inherited environment.
    #[must_use]
    pub fn process_env(&self, volume: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("NXF_HOME".to_string(), self.nxf_home.display().to_string()),
            ("NXF_OPTS".to_string(), self.nxf_opts.clone()),
            ("K8S_STORAGE_CLAIM_NAME".to_string(), volume.to_string()),
            ("NXF_DISABLE_CHECK_LATEST".to_string(), "true".to_string()),
        ])
    }
}
