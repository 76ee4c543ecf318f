// User-facing text (single locale)

pub const TITLE_PREFIX: &str = "รายละเอียดเครื่องจักร: ";
pub const NO_IMAGE: &str = "ไม่มีรูปภาพ";
pub const NO_FILE_CHOSEN: &str = "ยังไม่ได้เลือกไฟล์";
pub const NO_DETAIL_POINTS: &str = "ยังไม่มีจุดรายละเอียดการบำรุงรักษา";
pub const NO_HISTORY: &str = "ยังไม่มีประวัติการซ่อม";
pub const NO_CHART_DATA: &str = "ยังไม่มีข้อมูลสำหรับแสดงกราฟ";

pub const LOAD_ERROR: &str = "เกิดข้อผิดพลาดในการโหลดข้อมูล";
pub const ADD_POINT_ERROR: &str = "เกิดข้อผิดพลาดในการเพิ่มจุดรายละเอียด";
pub const ADD_MAINTENANCE_ERROR: &str = "เกิดข้อผิดพลาดในการเพิ่มประวัติการซ่อมบำรุง";
pub const DELETE_POINT_ERROR: &str = "เกิดข้อผิดพลาดในการลบจุดรายละเอียด";
pub const SAVED: &str = "บันทึกข้อมูลเรียบร้อยแล้ว";

pub const CONFIRM_DELETE_POINT: &str = "คุณแน่ใจหรือไม่ว่าต้องการลบจุดรายละเอียดนี้?";

pub const COST_DATASET_LABEL: &str = "ค่าใช้จ่ายรวม (บาท)";
pub const JOB_TYPE_DATASET_LABEL: &str = "จำนวนงาน";
