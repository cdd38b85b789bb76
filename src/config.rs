use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub practice: PracticeConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PracticeConfig {
    #[serde(default = "default_doctor_name")]
    pub doctor_name: String,
    #[serde(default = "default_specializations")]
    pub specializations: Vec<String>,
    #[serde(default = "default_experience")]
    pub experience: String,
    #[serde(default = "default_education")]
    pub education: String,
    #[serde(default = "default_surgeries")]
    pub surgeries: String,
    #[serde(default = "default_specialties")]
    pub specialties: Vec<String>,
    #[serde(default = "default_hospitals")]
    pub hospitals: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_phone")]
    pub phone: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_hours")]
    pub hours: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    #[serde(default = "default_welcome_delay_ms")]
    pub welcome_delay_ms: u64,
    #[serde(default = "default_suggested_delay_ms")]
    pub suggested_delay_ms: u64,
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            practice: PracticeConfig::default(),
            contact: ContactConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            doctor_name: default_doctor_name(),
            specializations: default_specializations(),
            experience: default_experience(),
            education: default_education(),
            surgeries: default_surgeries(),
            specialties: default_specialties(),
            hospitals: default_hospitals(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: default_phone(),
            email: default_email(),
            address: default_address(),
            hours: default_hours(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            welcome_delay_ms: default_welcome_delay_ms(),
            suggested_delay_ms: default_suggested_delay_ms(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
        }
    }
}

impl ChatConfig {
    // Zeroed delays for demos and tests.
    pub fn instant() -> Self {
        Self {
            welcome_delay_ms: 0,
            suggested_delay_ms: 0,
            reply_delay_min_ms: 0,
            reply_delay_max_ms: 0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&content).context("failed to parse config toml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.contact.phone.trim().is_empty() || self.contact.email.trim().is_empty() {
            bail!("contact.phone and contact.email are required");
        }
        if self.chat.reply_delay_min_ms > self.chat.reply_delay_max_ms {
            bail!("chat.reply_delay_min_ms must not exceed chat.reply_delay_max_ms");
        }
        Ok(())
    }
}

fn default_doctor_name() -> String {
    "Dr. Nisarg Parmar".to_string()
}

fn default_specializations() -> Vec<String> {
    vec![
        "Neurosurgeon".to_string(),
        "Spine Surgeon".to_string(),
        "Brain Tumor Expert".to_string(),
    ]
}

fn default_experience() -> String {
    "10+ years".to_string()
}

fn default_education() -> String {
    "NIMHANS Alumni, MCh Neurosurgery".to_string()
}

fn default_surgeries() -> String {
    "3000+ patients treated, 500+ successful surgeries".to_string()
}

fn default_specialties() -> Vec<String> {
    vec![
        "Brain Tumor Surgery".to_string(),
        "Spinal Surgery".to_string(),
        "Neurotrauma Care".to_string(),
        "Minimally Invasive Procedures".to_string(),
        "Emergency Neurosurgery".to_string(),
        "Spine Disorders Treatment".to_string(),
    ]
}

fn default_hospitals() -> Vec<String> {
    vec![
        "Pinnacle Brain and Spine Center".to_string(),
        "Unity Hospital - Consultant".to_string(),
        "SIDS Hospital - Visiting Consultant".to_string(),
    ]
}

fn default_phone() -> String {
    "+91 8160440014".to_string()
}

fn default_email() -> String {
    "drparmar@neurosurgery.com".to_string()
}

fn default_address() -> String {
    "Velocity Business Hub Adajan, Surat, Gujarat".to_string()
}

fn default_hours() -> String {
    "Mon-Sat: Various Timings".to_string()
}

fn default_welcome_delay_ms() -> u64 {
    500
}

fn default_suggested_delay_ms() -> u64 {
    800
}

fn default_reply_delay_min_ms() -> u64 {
    1_000
}

fn default_reply_delay_max_ms() -> u64 {
    2_000
}
