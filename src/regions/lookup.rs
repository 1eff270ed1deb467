//! Static per-region lookup tables
//!
//! Electricity prices are approximate industrial rates in USD/kWh.

/// Electricity price for a region id, if known
#[must_use]
pub fn electricity_price(region: &str) -> Option<f64> {
    let price = match region {
        "eastus" | "eastus2" => 0.12,
        "westus" => 0.18,
        "westus2" | "westus3" => 0.16,
        "centralus" | "northcentralus" => 0.11,
        "southcentralus" => 0.10,
        "northeurope" => 0.22,
        "westeurope" => 0.25,
        "uksouth" | "ukwest" => 0.26,
        "francecentral" => 0.24,
        "germanywestcentral" => 0.28,
        "norwayeast" => 0.30,
        "swedencentral" => 0.32,
        "eastasia" => 0.14,
        "southeastasia" => 0.15,
        "japaneast" | "japanwest" => 0.24,
        "australiaeast" | "australiasoutheast" | "australiacentral" => 0.28,
        "koreacentral" | "koreasouth" => 0.19,
        "canadacentral" | "canadaeast" => 0.11,
        "brazilsouth" => 0.16,
        "southindia" | "centralindia" | "westindia" => 0.08,
        "southafricanorth" => 0.14,
        "uaenorth" => 0.20,
        _ => return None,
    };
    Some(price)
}

/// IANA timezone for a region id, `UTC` when unknown
#[must_use]
pub fn timezone(region: &str) -> &'static str {
    match region {
        "eastus" | "eastus2" => "America/New_York",
        "westus" | "westus2" | "westus3" => "America/Los_Angeles",
        "centralus" | "southcentralus" | "northcentralus" => "America/Chicago",
        "canadacentral" => "America/Toronto",
        "canadaeast" => "America/Halifax",
        "brazilsouth" => "America/Sao_Paulo",
        "northeurope" => "Europe/Dublin",
        "westeurope" => "Europe/Amsterdam",
        "uksouth" | "ukwest" => "Europe/London",
        "francecentral" => "Europe/Paris",
        "germanywestcentral" => "Europe/Berlin",
        "norwayeast" => "Europe/Oslo",
        "swedencentral" => "Europe/Stockholm",
        "eastasia" => "Asia/Hong_Kong",
        "southeastasia" => "Asia/Singapore",
        "japaneast" | "japanwest" => "Asia/Tokyo",
        "australiaeast" | "australiacentral" => "Australia/Sydney",
        "australiasoutheast" => "Australia/Melbourne",
        "southindia" | "centralindia" | "westindia" => "Asia/Kolkata",
        "koreacentral" | "koreasouth" => "Asia/Seoul",
        "southafricanorth" => "Africa/Johannesburg",
        "uaenorth" => "Asia/Dubai",
        _ => "UTC",
    }
}

/// Country name for a provider geography, the geography itself when unknown
#[must_use]
pub fn country(geography: &str) -> String {
    let country = match geography {
        "Korea" => "South Korea",
        "UAE" => "United Arab Emirates",
        other => other,
    };
    country.to_string()
}
