/// Reachability of a monitored service as shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Up,
    Timeout,
}

impl ServiceState {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceState::Up => "正常运行",
            // HTTP errors are reported the same way as timeouts
            ServiceState::Timeout => "连接超时",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub service_name: String,
    pub state: ServiceState,
}

/// A health-check endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthTarget {
    pub name: String,
    pub url: String,
}

impl HealthTarget {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Campus services monitored by the status command, in display order
    pub fn campus_defaults() -> Vec<Self> {
        vec![
            Self::new(
                "教务系统",
                "https://xgfy.sit.edu.cn/unifri-flow/WF/Comm/ProcessRequest.do?DoType=DBAccess_RunSQLReturnTable",
            ),
            Self::new("电费服务", "https://myportal.sit.edu.cn/?rnd=1"),
            Self::new(
                "消费记录服务",
                "https://xgfy.sit.edu.cn/yktapi/services/querytransservice/querytrans",
            ),
            Self::new("应网办", "https://ywb.sit.edu.cn/v1"),
        ]
    }
}
