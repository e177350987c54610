#![allow(dead_code)]

use airlink::domain::ports::{ProcessOutput, ProcessRunner};
use airlink::utils::error::{AirlinkError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fake process runner: canned output per program, records every call.
#[derive(Clone, Default)]
pub struct FakeRunner {
    responses: Arc<Mutex<HashMap<String, ProcessOutput>>>,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, program: &str, exit_code: i32, stdout: &str) -> Self {
        self.responses.lock().unwrap().insert(
            program.to_string(),
            ProcessOutput {
                exit_code: Some(exit_code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|(program, _)| program).collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        self.responses
            .lock()
            .unwrap()
            .get(program)
            .cloned()
            .ok_or_else(|| AirlinkError::process(program, "failed to start: not found"))
    }
}

pub const XML_INVENTORY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<array>
	<dict>
		<key>_dataType</key>
		<string>SPAirPortDataType</string>
		<key>_items</key>
		<array>
			<dict>
				<key>spairport_airport_interfaces</key>
				<array>
					<dict>
						<key>_name</key>
						<string>en0</string>
						<key>spairport_airport_local_wireless_networks</key>
						<array>
							<dict>
								<key>_name</key>
								<string>Home</string>
								<key>spairport_network_channel</key>
								<string>6 (2GHz, 20MHz)</string>
								<key>spairport_network_phymode</key>
								<string>802.11b/g/n/ax</string>
								<key>spairport_security_mode</key>
								<string>spairport_security_mode_wpa2_personal</string>
								<key>spairport_signal_noise</key>
								<string>-52 dBm / -93 dBm</string>
							</dict>
							<dict>
								<key>_name</key>
								<string>Office</string>
								<key>spairport_network_channel</key>
								<integer>149</integer>
							</dict>
						</array>
					</dict>
					<dict>
						<key>_name</key>
						<string>awdl0</string>
					</dict>
				</array>
			</dict>
		</array>
		<key>_timeStamp</key>
		<date>2024-05-01T12:00:00Z</date>
	</dict>
</array>
</plist>
"#;
