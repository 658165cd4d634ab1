/// 定义以字符串形式存储的枚举
///
/// 自动生成：
/// - enum 定义（serde 序列化为小写字符串）
/// - as_str() / ALL
/// - Display、FromStr
/// - 带支持值提示的 Deserialize
#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $value:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn supported_values() -> String {
                [$($value),+].join(", ")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid value '{}'. Supported: {}",
                        s,
                        $name::supported_values()
                    )),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::models::common::RecordStatus;

    #[test]
    fn test_round_trip_and_errors() {
        assert_eq!("active".parse::<RecordStatus>(), Ok(RecordStatus::Active));
        assert_eq!(RecordStatus::Inactive.to_string(), "inactive");

        let err = "archived".parse::<RecordStatus>().unwrap_err();
        assert!(err.contains("active, inactive"));

        let parsed: RecordStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, RecordStatus::Inactive);
        assert!(serde_json::from_str::<RecordStatus>("\"Active\"").is_err());
        assert_eq!(
            serde_json::to_string(&RecordStatus::Active).unwrap(),
            "\"active\""
        );
    }
}
