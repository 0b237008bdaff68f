use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const FALLBACK_ICON: &str = "HelpOutline";

// Base names from the Material icon set the dashboard renders with.
// This is a subset; unknown names fall back rather than fail.
static KNOWN_ICONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "AccessTime",
        "AccountBalance",
        "AccountBalanceWallet",
        "AccountBox",
        "AccountCircle",
        "AccountTree",
        "Add",
        "AddCircle",
        "AddTask",
        "AdminPanelSettings",
        "Alarm",
        "Analytics",
        "Apartment",
        "Apps",
        "Archive",
        "Article",
        "Assessment",
        "Assignment",
        "AssignmentInd",
        "AssignmentTurnedIn",
        "AttachMoney",
        "Badge",
        "BarChart",
        "Block",
        "BlockOutlined",
        "Book",
        "Bookmark",
        "BusinessCenter",
        "Business",
        "Cake",
        "CalendarMonth",
        "CalendarToday",
        "CalendarViewMonth",
        "CalendarViewWeek",
        "Call",
        "Campaign",
        "Category",
        "ChecklistRtl",
        "CheckCircle",
        "Checklist",
        "ChevronLeft",
        "ChevronRight",
        "Class",
        "Cloud",
        "Code",
        "Construction",
        "ContactMail",
        "ContactPage",
        "ContactPhone",
        "Contacts",
        "CreditCard",
        "Dashboard",
        "DataUsage",
        "DateRange",
        "Delete",
        "Description",
        "DesktopWindows",
        "Devices",
        "DirectionsCar",
        "DirectionsBus",
        "DocumentScanner",
        "Domain",
        "Download",
        "Edit",
        "EditCalendar",
        "Email",
        "Engineering",
        "Event",
        "EventAvailable",
        "EventBusy",
        "EventNote",
        "Explore",
        "Face",
        "Feed",
        "Feedback",
        "FileCopy",
        "FilterList",
        "Fingerprint",
        "Flag",
        "Folder",
        "FolderShared",
        "Forum",
        "Gavel",
        "GridView",
        "Group",
        "GroupAdd",
        "GroupWork",
        "Groups",
        "Handshake",
        "HealthAndSafety",
        "HelpOutline",
        "History",
        "Home",
        "HomeWork",
        "HourglassEmpty",
        "HowToReg",
        "Hub",
        "Inbox",
        "Info",
        "Insights",
        "Inventory",
        "Inventory2",
        "Key",
        "Label",
        "Language",
        "Laptop",
        "LibraryBooks",
        "List",
        "ListAlt",
        "LocalHospital",
        "LocalShipping",
        "LocalTaxi",
        "LocationCity",
        "LocationOn",
        "Lock",
        "LockClock",
        "LockOpen",
        "Login",
        "Logout",
        "Loyalty",
        "Mail",
        "ManageAccounts",
        "ManageSearch",
        "Map",
        "Menu",
        "MenuBook",
        "MonetizationOn",
        "MoreTime",
        "Notifications",
        "Paid",
        "Payment",
        "Payments",
        "People",
        "PeopleAlt",
        "PendingActions",
        "Person",
        "PersonAdd",
        "PersonOff",
        "PersonSearch",
        "Phone",
        "PieChart",
        "Policy",
        "PostAdd",
        "Print",
        "Public",
        "QrCode",
        "QueryStats",
        "Quiz",
        "Receipt",
        "ReceiptLong",
        "Report",
        "RequestQuote",
        "Restore",
        "Route",
        "Router",
        "Rule",
        "Save",
        "Savings",
        "Schedule",
        "School",
        "Search",
        "Security",
        "Send",
        "Settings",
        "SettingsEthernet",
        "SettingsInputComponent",
        "Share",
        "Shield",
        "ShoppingCart",
        "ShowChart",
        "Sick",
        "Smartphone",
        "Speed",
        "Star",
        "Storage",
        "Store",
        "Summarize",
        "SupervisorAccount",
        "SupportAgent",
        "SwapHoriz",
        "Sync",
        "TableChart",
        "TaskAlt",
        "Timeline",
        "Timer",
        "Today",
        "Topic",
        "TrendingUp",
        "Tune",
        "Update",
        "Upload",
        "VerifiedUser",
        "ViewList",
        "ViewWeek",
        "Visibility",
        "VpnKey",
        "Wallet",
        "Warning",
        "WatchLater",
        "Wifi",
        "WifiLock",
        "Work",
        "WorkHistory",
        "WorkOff",
    ]
    .into_iter()
    .collect()
});

/// Style suffixes every base icon is also published under
const VARIANT_SUFFIXES: [&str; 4] = ["Outlined", "Rounded", "Sharp", "TwoTone"];

pub fn is_known_icon(name: &str) -> bool {
    if KNOWN_ICONS.contains(name) {
        return true;
    }
    VARIANT_SUFFIXES.iter().any(|suffix| {
        name.strip_suffix(suffix)
            .map(|base| KNOWN_ICONS.contains(base))
            .unwrap_or(false)
    })
}

/// Resolve a symbolic icon name, falling back to the placeholder icon
pub fn resolve_icon(name: &str) -> &str {
    let name = name.trim();
    if is_known_icon(name) {
        name
    } else {
        FALLBACK_ICON
    }
}
