pub(crate) mod deserializers;
pub(crate) mod general;
pub(crate) mod rules;

use general::General;
use rules::Rules;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use crate::app::assets::Asset;
use crate::app::structs::filter_rules::FilterRules;
use crate::controller::public::ControllerConfig;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: General,
    pub rules: Rules,
}

impl AppConfig {
    pub fn get_hide_rules(&self) -> FilterRules {
        self.rules.hide.apply_to(FilterRules::hide_defaults())
    }

    pub fn get_show_rules(&self) -> FilterRules {
        self.rules.show.apply_to(FilterRules::show_defaults())
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            timeout: Duration::from_millis(self.general.resolve_timeout_ms),
            hide_rules: self.get_hide_rules(),
            show_rules: self.get_show_rules(),
        }
    }
}

/// Reads the config file, writing the embedded default first when it does not exist.
pub fn load_configs(app_cfg_file: &Path) -> Result<AppConfig, String> {
    if let Some(dir) = app_cfg_file.parent().filter(|d| !d.as_os_str().is_empty() && !d.exists()) {
        std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    }

    if !app_cfg_file.exists() {
        let default_cfg = Asset::get_string("configs/winctl.toml").map_err(|e| e.to_string())?;
        std::fs::write(app_cfg_file, default_cfg).map_err(|e| e.to_string())?;
        log::info!("Default configuration written to {}", app_cfg_file.display());
    }

    let file_content = std::fs::read_to_string(app_cfg_file).map_err(|e| e.to_string())?;
    toml::from_str::<AppConfig>(&file_content).map_err(|e| e.to_string())
}
