//! Line-oriented rendering of a `FormState`.
//!
//! Each field is prompted with its label and current value. Pressing Enter
//! keeps the current value and a lone `-` clears it. After a blocked submit
//! only the fields with errors are asked again.

use std::io::{self, BufRead, Write};

use registration_core::{
    FieldSpec, FormState, Notice, NoticeKind, RegistrationClient, SubmitBlocked, Transport,
};

const CLEAR: &str = "-";

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run registrations until the user declines another one or input ends.
    pub fn run<T: Transport + ?Sized>(
        &mut self,
        form: &mut FormState,
        client: &RegistrationClient,
        transport: &T,
    ) -> io::Result<()> {
        writeln!(self.output, "Registration Form ({})", form.schema().name())?;
        writeln!(self.output, "Enter keeps the shown value, '{CLEAR}' clears it.")?;
        loop {
            if !self.register(form, client, transport)? {
                return Ok(());
            }
            if !self.confirm("Register another?")? {
                return Ok(());
            }
        }
    }

    /// Fill in and submit one registration. Returns false once input ends or
    /// the user gives up on a failed submission.
    fn register<T: Transport + ?Sized>(
        &mut self,
        form: &mut FormState,
        client: &RegistrationClient,
        transport: &T,
    ) -> io::Result<bool> {
        let all: Vec<FieldSpec> = form.schema().fields().to_vec();
        if !self.fill(form, &all)? {
            return Ok(false);
        }
        loop {
            writeln!(self.output, "Submitting...")?;
            match form.submit(client, transport) {
                Ok(notice) => {
                    self.show(&notice)?;
                    if notice.is_success() {
                        return Ok(true);
                    }
                    if !self.confirm("Edit and resubmit?")? || !self.fill(form, &all)? {
                        return Ok(false);
                    }
                }
                Err(SubmitBlocked::Invalid(errors)) => {
                    let invalid: Vec<FieldSpec> = form
                        .schema()
                        .fields()
                        .iter()
                        .filter(|spec| errors.get(&spec.name).is_some())
                        .cloned()
                        .collect();
                    for spec in &invalid {
                        if let Some(message) = errors.get(&spec.name) {
                            writeln!(self.output, "  ! {}: {message}", spec.label)?;
                        }
                    }
                    if !self.fill(form, &invalid)? {
                        return Ok(false);
                    }
                }
                Err(blocked) => {
                    writeln!(self.output, "Not submitted: {blocked}")?;
                    return Ok(false);
                }
            }
        }
    }

    /// Prompt for each of `fields`. Returns false when input ends.
    fn fill(&mut self, form: &mut FormState, fields: &[FieldSpec]) -> io::Result<bool> {
        for spec in fields {
            let current = form
                .record()
                .get(&spec.name)
                .map(|v| v.as_input())
                .unwrap_or_default();
            let marker = if spec.required { "*" } else { "" };
            let hint = spec.kind.hint().map(|h| format!(" ({h})")).unwrap_or_default();
            write!(self.output, "{}{marker}{hint} [{current}]: ", spec.label)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            let raw = match line.as_str() {
                "" => continue,
                CLEAR => "",
                typed => typed,
            };
            if let Err(e) = form.update(&spec.name, raw) {
                writeln!(self.output, "  ! {e}")?;
            }
        }
        Ok(true)
    }

    fn show(&mut self, notice: &Notice) -> io::Result<()> {
        let prefix = match notice.kind {
            NoticeKind::Success => "OK",
            NoticeKind::Rejected => "Rejected",
            NoticeKind::Failure => "Error",
        };
        writeln!(self.output, "{prefix}: {}", notice.message)
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} [y/N]: ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")))
    }

    /// One line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use registration_core::{
        FieldValue, FormSchema, HttpRequest, HttpResponse, TransportError,
    };

    use super::*;

    struct Canned {
        responses: RefCell<Vec<Result<HttpResponse, TransportError>>>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn bodies(&self) -> Vec<serde_json::Value> {
            self.sent
                .borrow()
                .iter()
                .map(|r| serde_json::from_str(r.body.as_deref().unwrap()).unwrap())
                .collect()
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.borrow_mut().push(request.clone());
            self.responses.borrow_mut().remove(0)
        }
    }

    fn run(schema: FormSchema, input: &str, transport: &Canned) -> (FormState, String) {
        let mut form = FormState::new(schema);
        let mut terminal = Terminal::new(Cursor::new(input.to_string()), Vec::new());
        terminal
            .run(&mut form, &RegistrationClient::default(), transport)
            .unwrap();
        let output = String::from_utf8(terminal.into_output()).unwrap();
        (form, output)
    }

    #[test]
    fn valid_entry_is_submitted_and_reset() {
        let transport = Canned::new(vec![Ok(HttpResponse::new(200, r#"{"message":"ok"}"#))]);
        let (form, output) = run(
            FormSchema::contact(),
            "Ada\nLovelace\n555-0100\nada@example.com\nn\n",
            &transport,
        );

        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["first_name"], "Ada");
        assert_eq!(bodies[0]["email"], "ada@example.com");
        assert!(output.contains("OK: ok"));
        assert_eq!(form.record().get("first_name"), Some(&FieldValue::from("")));
    }

    #[test]
    fn blank_required_field_is_asked_again() {
        let transport = Canned::new(vec![Ok(HttpResponse::new(200, r#"{"message":"ok"}"#))]);
        let (_, output) = run(
            FormSchema::registration(),
            // first_name left blank, then supplied on the re-prompt
            "\nLovelace\n\n555-0100\n\n\n\nAda\nn\n",
            &transport,
        );

        assert!(output.contains("! First Name: First name is required"));
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["first_name"], "Ada");
        assert_eq!(bodies[0]["email"], "");
    }

    #[test]
    fn rejected_submission_can_be_corrected() {
        let transport = Canned::new(vec![
            Ok(HttpResponse::new(409, r#"{"message":"Phone already registered"}"#)),
            Ok(HttpResponse::new(200, r#"{"message":"ok"}"#)),
        ]);
        let (_, output) = run(
            FormSchema::household(),
            // house_no 12, then on resubmit: keep everything but phone and clear house_no
            "Grace\nHopper\n555-0199\n\n12\n\n\ny\n\n\n555-0200\n\n-\n\n\nn\n",
            &transport,
        );

        assert!(output.contains("Rejected: Phone already registered"));
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0]["house_no"], 12);
        assert_eq!(bodies[1]["phone"], "555-0200");
        assert_eq!(bodies[1]["first_name"], "Grace");
        assert!(bodies[1]["house_no"].is_null());
    }

    #[test]
    fn transport_failure_keeps_values_for_retry() {
        let transport = Canned::new(vec![
            Err(TransportError::new("connection refused")),
            Ok(HttpResponse::new(200, r#"{"message":"ok"}"#)),
        ]);
        let (_, output) = run(
            FormSchema::contact(),
            "Ada\nLovelace\n555-0100\nada@example.com\ny\n\n\n\n\nn\n",
            &transport,
        );

        assert!(output.contains("Error: Could not reach the server."));
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0], bodies[1]);
    }

    #[test]
    fn end_of_input_stops_without_submitting() {
        let transport = Canned::new(Vec::new());
        let (form, _) = run(FormSchema::contact(), "Ada\n", &transport);
        assert!(transport.sent.borrow().is_empty());
        assert_eq!(form.record().get("first_name"), Some(&FieldValue::from("Ada")));
    }
}
