#[cfg(windows)]
pub mod win32 {
    pub mod api {
        pub mod process;
        pub mod window;
    }
    pub mod callbacks {
        pub mod enum_windows;
    }
    pub mod win32_api;
}

pub mod app {
    pub mod assets;
    pub mod cli_args;
    pub mod commands;
    pub mod configs;
    pub mod structs {
        pub mod exec_result;
        pub mod filter_rules;
        pub mod match_criterion;
        pub mod show_cmd;
        pub mod window_ref;
    }
}

pub mod controller {
    pub mod actions;
    pub mod filter;
    pub mod native;
    pub mod public;
    pub mod resolver;
    pub mod result;
    pub mod task;

    #[cfg(test)]
    pub(crate) mod fake_desktop;
}
