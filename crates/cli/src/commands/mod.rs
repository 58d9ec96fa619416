pub mod anova;
pub mod genotypes;
pub mod init;
pub mod lg_freqs;
pub mod max_freq;
pub mod resistant;
pub mod show_config;
